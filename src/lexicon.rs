//! Fixed lexicons used by the tokenizer and the analytics passes.
//!
//! Everything here is process-wide and read-only: loaded once, never mutated.

use std::collections::HashSet;

use lazy_static::lazy_static;

/// Gap (minutes) after which the next message opens a new conversation.
pub const CONVERSATION_GAP_MINUTES: f64 = 30.0;

/// Gaps outside (0, RESPONSE_WINDOW_MINUTES) are not real responses: negative
/// gaps are clock-skew artifacts, anything over a week is multi-day silence.
pub const RESPONSE_WINDOW_MINUTES: f64 = 10_080.0;

/// Hours counted as "late night" activity: [0, 4).
pub const LATE_NIGHT_HOURS: std::ops::Range<u32> = 0..4;

/// Below this many messages an analysis is not worth running. The engine
/// itself never enforces it; the policy belongs to the caller.
pub const MIN_MESSAGES_FOR_ANALYSIS: usize = 10;

/// Maximum raw messages included in the statistical digest sample.
pub const MAX_DIGEST_SAMPLE: usize = 20;

/// Tokens this short are dropped by the tokenizer.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Placeholder strings exports substitute for removed media. A message whose
/// entire text is one of these is dropped at flush time.
pub const MEDIA_PLACEHOLDERS: &[&str] = &[
    "<Media omitted>",
    "[Media omitted]",
    "[Image]",
    "[Video]",
    "[Audio]",
    "[Sticker]",
    "[Document]",
    "<attached>",
    "<Attachment>",
];

/// Greeting tokens that mark a conversation opener when found among the first
/// three tokens of a conversation-starting message.
pub const CONVERSATION_STARTERS: &[&str] = &[
    "hey", "hi", "hello", "hii", "hiii", "hiiii", "hiiiii", "yo", "yoo", "yooo", "sup",
    "whats up", "what's up", "wassup", "howdy", "greetings", "good morning",
    "good afternoon", "good evening", "gm", "gn", "good night", "goodnight",
];

const STOP_WORD_LIST: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
    "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
    "what", "which", "who", "whom", "this", "that", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "through", "during", "before", "after",
    "above", "below", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "will", "would", "should", "could", "can", "may", "might",
    "must", "shall", "to", "from", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor",
    "not", "only", "own", "same", "so", "than", "too", "very",
];

const AFFECTION_WORD_LIST: &[&str] = &[
    "love", "loved", "loving", "heart", "hearts", "romantic", "romance", "passion",
    "passionate", "intimate", "intimacy", "hugs", "hug", "kiss", "kisses", "kissing",
    "tender", "tenderness", "gentle", "gentleness", "warm", "warmth", "comfort",
    "comforting", "sweet", "sweeter", "sweetest", "cute", "cuter", "cutest", "beautiful",
    "gorgeous", "darling", "dear", "honey", "baby", "babe", "sweetheart", "beloved",
    "treasure", "angel", "prince", "princess", "amazing", "wonderful", "fantastic",
    "awesome", "perfect", "incredible", "unbelievable", "extraordinary", "remarkable",
    "precious", "special", "unique", "irreplaceable", "valuable", "miss", "missing",
    "care", "caring", "adore", "adoring", "cherish", "cherishing", "fond", "fondness",
    "affection", "affectionate", "secure", "security", "trust", "trusting", "faithful",
    "faithfulness", "loyal", "loyalty", "devoted", "devotion", "commitment", "together",
    "forever", "always", "promise", "promises", "dream", "dreams", "hope", "hopes",
    "wish", "wishes", "blessed", "blessing", "grateful", "gratitude", "thankful",
    "appreciate", "appreciation", "jaan", "bro", "bestie", "dude", "buddy", "friend",
    "mate", "pal",
];

const POSITIVE_WORD_LIST: &[&str] = &[
    "love", "amazing", "wonderful", "great", "awesome", "fantastic", "perfect",
    "beautiful", "sweet", "cute", "happy", "excited", "joy", "smile", "laugh", "fun",
    "good", "best", "excellent", "brilliant", "yay", "yes", "yeah", "cool", "nice",
];

const NEGATIVE_WORD_LIST: &[&str] = &[
    "hate", "terrible", "awful", "bad", "sad", "angry", "upset", "disappointed",
    "frustrated", "annoyed", "worried", "scared", "hurt", "pain", "cry", "sick",
    "tired", "bored", "stupid", "dumb", "nope", "ugh", "ughh",
];

/// Keyword groups for topic detection, in a fixed presentation order.
pub const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("work", &["work", "job", "office", "meeting", "project", "boss", "colleague", "deadline", "presentation"]),
    ("food", &["food", "eat", "eating", "hungry", "restaurant", "cooking", "recipe", "delicious", "tasty", "meal", "dinner", "lunch", "breakfast"]),
    ("travel", &["travel", "trip", "vacation", "flight", "hotel", "beach", "mountain", "city", "country", "visit", "explore"]),
    ("entertainment", &["movie", "film", "show", "series", "music", "song", "book", "game", "fun", "entertainment", "watch", "listen"]),
    ("family", &["family", "mom", "dad", "mother", "father", "sister", "brother", "parent", "relative", "home"]),
    ("health", &["health", "sick", "ill", "doctor", "medicine", "exercise", "gym", "fitness", "pain", "better", "well"]),
    ("shopping", &["buy", "shopping", "store", "price", "expensive", "cheap", "money", "pay", "card", "cash"]),
    ("technology", &["phone", "computer", "internet", "app", "software", "tech", "device", "online", "digital"]),
];

const POSITIVE_EMOJI_LIST: &[char] = &[
    '😊', '😄', '😃', '😁', '😆', '😂', '🤣', '😍', '🥰', '😘', '❤', '💕', '💖', '💗',
    '💝', '✨', '🌟', '💫', '🌈', '🎉', '🎊', '👏', '👍', '🙌', '🔥', '💯', '😇', '🥺',
    '😌',
];

const NEGATIVE_EMOJI_LIST: &[char] = &[
    '😢', '😭', '😔', '😞', '😟', '😕', '🙁', '☹', '😠', '😡', '😤', '😒', '😑', '😐',
    '😶', '💔', '😰', '😨', '😱', '😖', '😣', '😫', '😩',
];

const AFFECTION_EMOJI_LIST: &[char] = &[
    '❤', '💕', '💖', '💗', '💘', '💝', '💞', '💟', '💌', '💋', '😍', '🥰', '😘', '🤗',
    '🤩', '😊', '😌', '🥺', '😇', '💯', '✨', '🌟', '💫', '🌈', '🦄', '🌸', '🌺', '🌻',
    '🌷', '🌹', '🌼', '💐', '🎀', '🎁', '💎', '🏆', '🥇', '👑', '💍',
];

lazy_static! {
    pub static ref STOP_WORDS: HashSet<&'static str> = STOP_WORD_LIST.iter().copied().collect();
    pub static ref STARTER_SET: HashSet<&'static str> =
        CONVERSATION_STARTERS.iter().copied().collect();
    pub static ref AFFECTION_WORDS: HashSet<&'static str> =
        AFFECTION_WORD_LIST.iter().copied().collect();
    pub static ref POSITIVE_WORDS: HashSet<&'static str> =
        POSITIVE_WORD_LIST.iter().copied().collect();
    pub static ref NEGATIVE_WORDS: HashSet<&'static str> =
        NEGATIVE_WORD_LIST.iter().copied().collect();
    pub static ref POSITIVE_EMOJIS: HashSet<char> = POSITIVE_EMOJI_LIST.iter().copied().collect();
    pub static ref NEGATIVE_EMOJIS: HashSet<char> = NEGATIVE_EMOJI_LIST.iter().copied().collect();
    pub static ref AFFECTION_EMOJIS: HashSet<char> = AFFECTION_EMOJI_LIST.iter().copied().collect();
    pub static ref MEDIA_PLACEHOLDER_SET: HashSet<&'static str> =
        MEDIA_PLACEHOLDERS.iter().copied().collect();
}
