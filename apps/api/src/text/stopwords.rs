//! English function words and generic job-posting vocabulary.
//!
//! Used by the rule-based extractor to keep domain-term candidates meaningful.
//! The table is immutable and shared by every request.

use std::collections::HashSet;
use std::sync::LazyLock;

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORD_LIST.iter().copied().collect());

/// Returns true when `word` (any case) is a stopword.
pub fn is_stopword(word: &str) -> bool {
    if word.chars().any(|c| c.is_ascii_uppercase()) {
        STOPWORDS.contains(word.to_ascii_lowercase().as_str())
    } else {
        STOPWORDS.contains(word)
    }
}

/// Number of entries in the table.
pub fn stopword_count() -> usize {
    STOPWORDS.len()
}

#[rustfmt::skip]
const STOPWORD_LIST: &[&str] = &[
    "a", "abilities", "ability", "able", "about", "above", "abroad", "access", "according",
    "accordingly", "across", "action", "active", "activity", "actual", "actually", "addition",
    "address", "advantage", "after", "afterwards", "again", "against", "age", "agent", "ago",
    "agree", "agreement", "ahead", "all", "allow", "allows", "almost", "alone", "along",
    "alongside", "already", "also", "although", "always", "am", "amid", "amidst", "among",
    "amongst", "amount", "an", "and", "another", "answer", "any", "anybody", "anyhow", "anyone",
    "anything", "anyway", "anyways", "anywhere", "apart", "appear", "appeared", "appearing",
    "appears", "applicant", "applicants", "apply", "applying", "appreciate", "approach",
    "appropriate", "are", "area", "around", "article", "as", "aside", "ask", "asking", "aspect",
    "associated", "assume", "at", "attempt", "attention", "available", "average", "avoid", "away",
    "awfully", "back", "backward", "backwards", "bad", "base", "basic", "basis", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "begin",
    "beginning", "behind", "being", "believe", "below", "benefit", "benefits", "beside",
    "besides", "best", "better", "between", "beyond", "big", "body", "bonus", "book", "both",
    "brief", "bring", "build", "business", "but", "by", "call", "came", "can", "candidate",
    "candidates", "cannot", "cant", "care", "carry", "case", "cause", "causes", "center",
    "central", "century", "certain", "certainly", "challenge", "change", "changes", "character",
    "check", "choice", "choose", "class", "clear", "clearly", "close", "co", "cold", "collect",
    "come", "comes", "coming", "comment", "common", "community", "company", "compare",
    "compensation", "complete", "complex", "concern", "concerning", "condition", "consequently",
    "consider", "considering", "contain", "containing", "contains", "continue", "contract",
    "control", "corresponding", "cost", "could", "count", "country", "course", "cover", "create",
    "culture", "current", "currently", "customer", "dare", "date", "day", "days", "deal",
    "decide", "decision", "deep", "definitely", "degree", "demonstrated", "describe", "described",
    "design", "desired", "despite", "detail", "determine", "develop", "did", "difference",
    "different", "difficult", "direct", "directly", "discover", "discuss", "discussion",
    "diverse", "diversity", "do", "doctor", "does", "doing", "done", "door", "double", "down",
    "downwards", "drive", "drop", "during", "duties", "each", "early", "east", "easy", "economic",
    "economy", "edge", "education", "effect", "effort", "eg", "eight", "eighty", "either", "else",
    "elsewhere", "employer", "employment", "encourage", "end", "ending", "energy", "enough",
    "ensure", "enter", "entire", "entirely", "environment", "equal", "equity", "equivalent",
    "especially", "establish", "et", "etc", "even", "evening", "event", "ever", "evermore",
    "every", "everybody", "everyone", "everything", "everywhere", "evidence", "ex", "exactly",
    "example", "excellent", "except", "exceptional", "exist", "expect", "experience",
    "experienced", "expertise", "explain", "face", "fact", "factor", "fairly", "fall", "false",
    "familiar", "familiarity", "family", "far", "farther", "fast", "father", "feel", "feeling",
    "few", "fewer", "field", "fifth", "figure", "fill", "final", "finally", "find", "fine",
    "finger", "finish", "fire", "firm", "first", "five", "floor", "focus", "follow", "followed",
    "following", "follows", "food", "foot", "for", "force", "foreign", "forever", "forget",
    "form", "former", "formerly", "forth", "forward", "found", "four", "free", "frequently",
    "friend", "from", "front", "full", "fulltime", "function", "fund", "further", "furthermore",
    "future", "gain", "general", "generally", "get", "gets", "getting", "given", "gives",
    "giving", "glass", "go", "goal", "goes", "going", "gone", "good", "got", "gotten", "great",
    "greetings", "ground", "group", "grow", "growth", "guess", "guide", "had", "half", "hand",
    "handle", "hands", "hang", "happen", "happens", "happy", "hard", "hardly", "has", "have",
    "having", "he", "head", "health", "hear", "heart", "heat", "heavy", "hello", "help", "hence",
    "her", "here", "hereafter", "hereby", "herein", "hereof", "hereupon", "hers", "herself", "hi",
    "high", "him", "himself", "hiring", "his", "hit", "hither", "hold", "home", "hope",
    "hopefully", "hot", "hotel", "hour", "house", "how", "howbeit", "however", "huge", "human",
    "hundred", "hybrid", "i", "idea", "ideal", "identify", "ie", "if", "ignored", "image",
    "imagine", "immediate", "impact", "important", "impossible", "in", "inasmuch", "inc",
    "include", "including", "inclusion", "increase", "indeed", "indicate", "indicated",
    "indicates", "individual", "industry", "information", "inner", "inside", "insofar", "instead",
    "interest", "international", "interview", "into", "involve", "inward", "is", "issue", "it",
    "item", "its", "itself", "join", "joining", "just", "keep", "keeps", "kept", "kind", "king",
    "kitchen", "know", "knowledge", "known", "knows", "land", "language", "large", "last", "late",
    "lately", "later", "latter", "latterly", "laugh", "law", "lay", "lead", "learn", "least",
    "leave", "left", "legal", "less", "lest", "let", "letter", "level", "life", "light", "like",
    "liked", "likely", "likewise", "line", "list", "listen", "little", "live", "local",
    "location", "long", "look", "looking", "looks", "lose", "loss", "love", "low", "lower", "ltd",
    "machine", "made", "magazine", "main", "mainly", "maintain", "major", "majority", "make",
    "makes", "making", "manage", "manager", "manner", "many", "market", "marriage", "material",
    "matter", "may", "maybe", "me", "mean", "meaning", "meantime", "meanwhile", "measure",
    "media", "medical", "meet", "meeting", "member", "memory", "mention", "merely", "message",
    "method", "middle", "might", "military", "million", "mind", "mine", "minimum", "minor",
    "minus", "minute", "miss", "mission", "model", "modern", "moment", "money", "month", "months",
    "more", "moreover", "morning", "most", "mostly", "mother", "motivated", "mouth", "move",
    "movement", "movie", "mr", "mrs", "much", "music", "must", "my", "myself", "name", "namely",
    "nation", "national", "natural", "nature", "near", "nearly", "necessary", "neck", "need",
    "needs", "neither", "network", "never", "neverless", "nevertheless", "new", "news",
    "newspaper", "next", "nice", "night", "nine", "ninety", "no", "nobody", "non", "none",
    "nonetheless", "noone", "nor", "normally", "not", "note", "nothing", "notice",
    "notwithstanding", "novel", "now", "nowhere", "number", "obviously", "occur", "of", "off",
    "offer", "office", "officer", "official", "often", "oh", "ok", "okay", "old", "on", "once",
    "one", "ones", "oneself", "only", "onto", "open", "operation", "opportunities", "opportunity",
    "opposite", "option", "or", "order", "organization", "other", "others", "otherwise", "ought",
    "our", "ours", "ourself", "ourselves", "out", "outside", "outstanding", "over", "overall",
    "own", "owner", "package", "page", "pain", "painting", "paper", "parent", "part",
    "participant", "particular", "particularly", "partner", "parttime", "party", "pass",
    "passionate", "past", "patient", "pattern", "pay", "peace", "people", "per", "perform",
    "performance", "perhaps", "period", "perks", "permanent", "person", "personal", "phone",
    "physical", "pick", "picture", "piece", "place", "placed", "plan", "plant", "play", "player",
    "please", "plus", "point", "police", "policy", "political", "politics", "poor", "popular",
    "population", "position", "positions", "positive", "possible", "power", "practice",
    "preferred", "prepare", "present", "president", "pressure", "presumably", "pretty", "prevent",
    "previous", "price", "primary", "private", "probably", "problem", "process", "produce",
    "product", "production", "professional", "professor", "proficiency", "proficient", "program",
    "project", "property", "protect", "prove", "proven", "provide", "provided", "provides",
    "public", "pull", "purpose", "push", "qualifications", "quality", "question", "quickly",
    "quite", "race", "radio", "raise", "range", "rarely", "rate", "rather", "re", "reach", "read",
    "ready", "real", "reality", "realize", "really", "reason", "reasonably", "receive", "recent",
    "recently", "recognize", "record", "reduce", "reflect", "regarding", "regardless", "regards",
    "region", "relate", "related", "relationship", "relatively", "relevant", "remain", "remember",
    "remote", "remove", "report", "represent", "require", "required", "requirements", "research",
    "resource", "respectively", "respond", "response", "responsibilities", "responsibility",
    "responsible", "rest", "result", "return", "reveal", "rich", "right", "rise", "risk", "road",
    "rock", "role", "roles", "room", "round", "rule", "safe", "said", "salary", "same", "save",
    "saw", "say", "saying", "says", "scene", "school", "science", "scientist", "score", "sea",
    "season", "seat", "second", "secondary", "secondly", "section", "security", "see", "seeing",
    "seek", "seeking", "seem", "seemed", "seeming", "seems", "seen", "seldom", "self", "sell",
    "selves", "send", "senior", "sense", "sensible", "sent", "series", "serious", "seriously",
    "serve", "service", "seven", "several", "shake", "shall", "share", "she", "sheet", "shoot",
    "short", "shot", "should", "shoulder", "show", "side", "sign", "significant", "similar",
    "simple", "simply", "since", "sing", "single", "sister", "site", "situation", "six", "size",
    "skill", "skin", "small", "smile", "so", "social", "society", "soldier", "solid", "some",
    "somebody", "someday", "somehow", "someone", "something", "sometime", "sometimes", "somewhat",
    "somewhere", "song", "soon", "sorry", "sort", "sound", "source", "south", "southern", "space",
    "speak", "special", "specific", "specifically", "specified", "specify", "specifying",
    "speech", "spend", "sport", "spring", "staff", "stage", "stand", "standard", "star", "start",
    "state", "statement", "station", "stay", "step", "still", "stock", "stop", "store", "story",
    "strategy", "street", "strong", "structure", "student", "study", "stuff", "style", "sub",
    "subject", "success", "successful", "such", "suddenly", "suffer", "suggest", "summer",
    "support", "sure", "surface", "system", "table", "take", "taken", "taking", "talk", "task",
    "teach", "teacher", "team", "technology", "television", "tell", "temporary", "tend", "tends",
    "term", "test", "text", "than", "thank", "thanks", "that", "thats", "the", "their", "theirs",
    "them", "themselves", "then", "thence", "theory", "there", "thereafter", "thereby",
    "therefor", "therefore", "therein", "thereof", "theres", "thereupon", "these", "they",
    "thing", "things", "think", "third", "thirty", "this", "thorough", "thoroughly", "those",
    "though", "thought", "thousand", "threat", "three", "through", "throughout", "throw", "thru",
    "thus", "till", "to", "today", "together", "tonight", "too", "took", "total", "tough",
    "toward", "towards", "town", "trade", "traditional", "training", "travel", "treat",
    "treatment", "tree", "trial", "tried", "tries", "trip", "trouble", "true", "truly", "truth",
    "try", "trying", "turn", "twice", "two", "type", "un", "under", "underneath", "understand",
    "understanding", "undoing", "unfortunately", "unit", "unless", "unlike", "unlikely", "until",
    "unto", "up", "upon", "upwards", "us", "use", "used", "useful", "uses", "using", "usual",
    "usually", "value", "values", "various", "versus", "very", "via", "victim", "view",
    "violence", "vision", "visit", "voice", "vote", "vs", "wait", "walk", "wall", "want", "wants",
    "was", "watch", "water", "way", "we", "weapon", "wear", "week", "weeks", "weight", "welcome",
    "well", "went", "were", "west", "western", "what", "whatever", "whatsoever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereof", "whereupon",
    "wherever", "whether", "which", "whichever", "while", "whilst", "white", "whither", "who",
    "whoever", "whole", "whom", "whomever", "whose", "why", "wide", "wife", "will", "willing",
    "wind", "window", "wish", "with", "within", "without", "woman", "wonder", "word", "work",
    "worker", "working", "world", "worry", "worse", "worst", "worth", "would", "write", "writer",
    "wrong", "yard", "yeah", "year", "years", "yes", "yesterday", "yet", "you", "young", "your",
    "yours", "yourself", "yourselves", "zero",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_function_words_are_stopwords() {
        for w in ["the", "and", "of", "with", "would", "themselves"] {
            assert!(is_stopword(w), "{w} should be a stopword");
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(is_stopword("The"));
        assert!(is_stopword("EXPERIENCE"));
    }

    #[test]
    fn test_technical_terms_are_not_stopwords() {
        for w in ["python", "kubernetes", "terraform", "postgresql", "leadership"] {
            assert!(!is_stopword(w), "{w} must survive the filter");
        }
    }

    #[test]
    fn test_table_is_large() {
        assert!(stopword_count() > 900, "got {}", stopword_count());
    }
}
