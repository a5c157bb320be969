//! Word lists for the lexicon tagger. All entries are lowercase.

/// Function words and frequent verbs/adverbs. Tokens in this list are never keywords.
pub(crate) const CLOSED_CLASS: &[&str] = &[
    // determiners and quantifiers
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "much", "many", "more", "most", "few", "several",
    "another", "such", "per",
    // pronouns
    "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours", "he", "him",
    "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs", "who", "whom",
    "whose", "which", "what", "itself", "themselves", "yourself",
    // prepositions
    "of", "in", "on", "at", "by", "for", "with", "without", "from", "to", "into", "onto", "over",
    "under", "above", "below", "about", "across", "after", "before", "behind", "beside",
    "between", "beyond", "during", "inside", "near", "off", "out", "outside", "through",
    "toward", "towards", "upon", "within", "against", "along", "among", "around", "via", "up",
    "down", "next",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "than", "as", "whether",
    "though", "although", "unless", "until",
    // auxiliaries and frequent verbs
    "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "done",
    "have", "has", "had", "having", "will", "would", "shall", "should", "can", "could", "may",
    "might", "must", "get", "gets", "got", "make", "makes", "made", "use", "used", "contains",
    "contain", "keep", "store", "serve", "enjoy", "try", "add", "mix", "open", "shake",
    "sitting", "standing", "holding", "lying", "sits", "stands",
    // adverbs and particles
    "not", "very", "too", "also", "just", "only", "now", "then", "there", "here", "when",
    "where", "why", "how", "again", "ever", "never", "always", "often", "once", "well", "even",
    "still", "already", "soon", "really", "quite", "away",
    // number words
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "dozen",
    "half", "first", "second", "third",
];

/// Adjectives that the suffix rules would miss.
pub(crate) const ADJECTIVES: &[&str] = &[
    // colour
    "red", "green", "blue", "yellow", "orange", "purple", "pink", "black", "white", "brown",
    "grey", "gray", "golden", "silver", "dark", "light", "bright", "clear",
    // size and shape
    "big", "small", "large", "little", "tiny", "huge", "mini", "long", "short", "tall", "thin",
    "thick", "round", "square", "flat", "wide", "slim", "extra",
    // taste and texture
    "sweet", "sour", "bitter", "hot", "mild", "cold", "warm", "fresh", "soft", "hard", "smooth",
    "rich", "crisp", "tender", "rare", "raw", "ripe", "dry", "wet", "crunchy", "creamy",
    "chunky", "natural", "pure", "whole", "plain", "lean", "strong",
    // quality and marketing
    "new", "old", "good", "best", "better", "great", "fine", "premium", "classic", "original",
    "organic", "deluxe", "gourmet", "vegan", "gluten", "free", "real", "authentic", "special",
    "ultra", "super", "instant", "daily", "healthy", "handmade", "homemade", "artisan", "local",
    "wild", "gentle", "nice", "tasty", "cute", "modern", "vintage", "antique", "low", "high",
    "full", "empty", "heavy", "wooden", "woolen", "leather", "cotton",
    // adjectives ending in -ly
    "lovely", "friendly", "curly", "chilly", "oily", "bubbly", "silly", "ugly", "lively",
    "costly", "jolly", "woolly",
];

/// Words the adjective suffix rules would misclassify.
pub(crate) const NOUN_EXCEPTIONS: &[&str] = &[
    // -y
    "candy", "party", "puppy", "baby", "body", "city", "family", "berry", "honey",
    "money", "key", "toy", "galaxy", "pastry", "pantry", "curry", "gravy", "soy", "turkey",
    "jersey", "hockey", "whisky", "whiskey", "brandy", "teddy", "kitty", "cherry",
    "strawberry", "raspberry", "blueberry", "cranberry", "poultry", "dairy", "bakery",
    "battery", "accessory", "beauty", "energy", "jewelry", "jewellery", "pottery", "cutlery",
    "laundry", "celery", "parsley", "barley", "granny", "pony", "jelly", "belly", "lolly",
    "bunny", "lady", "story", "copy", "entry", "country", "variety", "quality", "quantity",
    "warranty", "delivery", "recovery", "therapy", "gummy", "daisy", "peony", "chutney",
    "kidney", "trophy", "penny",
    // -ive
    "olive", "chive", "drive", "hive", "archive", "additive", "preservative",
    // -ic
    "garlic", "tonic", "music", "fabric", "topic", "picnic", "clinic", "traffic", "magic",
    "comic", "relic", "logic", "mosaic", "arabic", "cosmetic",
    // -able / -ible
    "table", "vegetable", "cable", "fable", "bible", "turntable", "timetable",
    // -ful
    "handful", "mouthful", "spoonful", "cupful",
    // -ish
    "radish", "relish", "polish", "finish", "dish", "fish", "wish", "swish", "catfish",
    "starfish", "goldfish", "shellfish", "jellyfish",
    // -ed
    "seed", "feed", "weed", "speed", "need", "breed", "steed", "bed", "shed", "sled", "shred",
    "bread",
];

/// Suffixes that mark an adjective. Each entry is `(suffix, minimum word length)`.
pub(crate) const ADJECTIVE_SUFFIXES: &[(&str, usize)] = &[
    ("ous", 5),
    ("ful", 5),
    ("less", 6),
    ("ive", 5),
    ("able", 6),
    ("ible", 6),
    ("ic", 5),
    ("ish", 6),
    ("ed", 5),
];
