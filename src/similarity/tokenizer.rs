use hashbrown::HashSet;

// Fixed English stop-word list applied to review and cuisine text.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

const MIN_TOKEN_CHARS: usize = 2;

/// Splits text into lowercase word tokens.
///
/// A token is a maximal run of alphanumeric characters or underscores that is at least
/// two characters long. Tokens in the stop-word set are dropped.
pub struct Tokenizer {
    stop_words: HashSet<&'static str>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Tokenizer {
    pub fn english() -> Self {
        Tokenizer {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
        }
    }

    pub fn without_stop_words() -> Self {
        Tokenizer {
            stop_words: HashSet::new(),
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .filter(|token| !self.stop_words.contains(token))
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tokenizer_test {
    use super::*;

    #[test]
    fn should_lowercase_and_drop_stop_words() {
        let tokenizer = Tokenizer::english();
        let tokens = tokenizer.tokenize("The BEST pasta in town, and the tiramisu!");
        assert_eq!(vec!["best", "pasta", "town", "tiramisu"], tokens);
    }

    #[test]
    fn should_drop_single_character_tokens() {
        let tokenizer = Tokenizer::without_stop_words();
        let tokens = tokenizer.tokenize("a b 5 ok x_y");
        assert_eq!(vec!["ok", "x_y"], tokens);
    }

    #[test]
    fn should_split_on_punctuation_and_keep_unicode_letters() {
        let tokenizer = Tokenizer::english();
        let tokens = tokenizer.tokenize("crème-brûlée/ramen");
        assert_eq!(vec!["crème", "brûlée", "ramen"], tokens);
    }

    #[test]
    fn should_return_nothing_for_empty_text() {
        assert!(Tokenizer::english().tokenize("").is_empty());
        assert!(Tokenizer::english().tokenize("   ,,, ").is_empty());
    }
}
