//! Pet-name generator for alien display names.
//!
//! Names look like `loudly-brave-walrus_3`: `words - 2` adverbs, one
//! adjective and one animal, joined by a separator and suffixed with the id.

use std::sync::Arc;

use invasion_domain::AlienId;

use crate::infrastructure::ports::{NamePort, RandomPort};

static ADVERBS: &[&str] = &[
    "boldly", "briskly", "calmly", "deeply", "eagerly", "fairly", "gently", "happily",
    "hardly", "highly", "jointly", "keenly", "kindly", "largely", "loudly", "mainly",
    "merely", "mildly", "mostly", "neatly", "newly", "nicely", "openly", "partly",
    "quickly", "quietly", "rapidly", "rarely", "really", "sadly", "safely", "sharply",
    "slowly", "smoothly", "solely", "steadily", "strongly", "surely", "swiftly", "truly",
    "vastly", "warmly", "weekly", "widely", "wildly", "wisely",
];

static ADJECTIVES: &[&str] = &[
    "able", "amazing", "amused", "apt", "awake", "bold", "brave", "bright",
    "busy", "calm", "clean", "clever", "cosmic", "crisp", "curious", "daring",
    "eager", "epic", "fancy", "fast", "fine", "firm", "fluent", "frank",
    "gentle", "giving", "glad", "golden", "grand", "happy", "hardy", "honest",
    "humble", "jolly", "keen", "kind", "lively", "loyal", "lucky", "merry",
    "mighty", "modest", "noble", "patient", "polite", "proud", "quick", "quiet",
    "rapid", "sharp", "shining", "smart", "smooth", "steady", "sunny", "sweet",
    "tender", "tidy", "vast", "vital", "warm", "wise", "witty", "zesty",
];

static ANIMALS: &[&str] = &[
    "ant", "badger", "bat", "bear", "beetle", "bison", "boar", "cat",
    "cobra", "condor", "crab", "crane", "crow", "deer", "dingo", "dodo",
    "eagle", "eel", "elk", "falcon", "ferret", "finch", "fox", "gecko",
    "gibbon", "goat", "goose", "hare", "hawk", "heron", "hornet", "ibex",
    "jackal", "koala", "lemur", "lion", "llama", "lynx", "marten", "mole",
    "moose", "newt", "octopus", "orca", "otter", "owl", "panda", "puma",
    "quail", "raven", "seal", "shark", "sloth", "squid", "stork", "tapir",
    "tiger", "toad", "viper", "vole", "walrus", "weasel", "wolf", "yak",
];

const DEFAULT_WORDS: usize = 3;
const DEFAULT_SEPARATOR: &str = "-";

pub struct PetNamer {
    random: Arc<dyn RandomPort>,
    words: usize,
    separator: String,
}

impl PetNamer {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self {
            random,
            words: DEFAULT_WORDS,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Number of words before the id suffix. Clamped to at least one.
    #[cfg(test)]
    pub(crate) fn with_words(mut self, words: usize) -> Self {
        self.words = words.max(1);
        self
    }

    #[cfg(test)]
    pub(crate) fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    fn pick(&self, list: &'static [&'static str]) -> &'static str {
        let index = self.random.gen_index(list.len());
        list.get(index).or_else(|| list.first()).copied().unwrap_or_default()
    }

    fn generate(&self) -> String {
        let mut parts = Vec::with_capacity(self.words);
        for _ in 2..self.words {
            parts.push(self.pick(ADVERBS));
        }
        if self.words >= 2 {
            parts.push(self.pick(ADJECTIVES));
        }
        parts.push(self.pick(ANIMALS));
        parts.join(&self.separator)
    }
}

impl NamePort for PetNamer {
    fn name_for(&self, id: AlienId) -> String {
        format!("{}_{}", self.generate(), id)
    }
}
