use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use log::info;
use crate::tokeniser::tokenise;

/// Label returned when there is nothing to classify
pub(crate) const FALLBACK_CATEGORY: &str = "Misc";

/// Laplace smoothing
const ALPHA: f64 = 1.0;

/// Built-in training phrases and the category each one belongs to.
pub(crate) const TRAINING_EXAMPLES: [(&str, &str); 25] = [
    ("lunch at restaurant", "Food"),
    ("dinner with friends", "Food"),
    ("coffee and snacks", "Food"),
    ("grocery shopping vegetables", "Food"),
    ("pizza delivery", "Food"),
    ("bus ticket", "Travel"),
    ("train fare to office", "Travel"),
    ("flight booking", "Travel"),
    ("taxi ride home", "Travel"),
    ("petrol for bike", "Travel"),
    ("new shoes", "Shopping"),
    ("bought a shirt", "Shopping"),
    ("online order clothes", "Shopping"),
    ("headphones from mall", "Shopping"),
    ("gift for birthday", "Shopping"),
    ("electricity bill", "Bills"),
    ("mobile recharge", "Bills"),
    ("internet bill payment", "Bills"),
    ("house rent", "Bills"),
    ("water bill", "Bills"),
    ("movie tickets", "Entertainment"),
    ("netflix subscription", "Entertainment"),
    ("concert pass", "Entertainment"),
    ("video game purchase", "Entertainment"),
    ("bowling night out", "Entertainment"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    TooFewClasses(usize),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassifierError::TooFewClasses(n) => write!(f, "classifier needs at least 2 categories to train, found {}", n),
        }
    }
}

impl std::error::Error for ClassifierError {}

/// Multinomial naive Bayes over bag-of-words counts.
/// Built once from example phrases and read-only afterwards.
#[derive(Debug)]
pub(crate) struct Classifier {
    /// Token to column index
    vocabulary: HashMap<String, usize>,
    /// Sorted, so ties resolve to the alphabetically first label
    labels: Vec<String>,
    log_priors: Vec<f64>,
    /// `log_likelihoods[label][token]`
    log_likelihoods: Vec<Vec<f64>>,
}

impl Classifier {
    /// Train on the built-in table plus any extra examples.
    pub(crate) fn with_extra_examples(extra: &[(String, String)]) -> Result<Classifier, ClassifierError> {
        let mut examples: Vec<(&str, &str)> = TRAINING_EXAMPLES.to_vec();
        examples.extend(extra.iter().map(|(phrase, label)| (phrase.as_str(), label.as_str())));
        Classifier::train(&examples)
    }

    pub(crate) fn train(examples: &[(&str, &str)]) -> Result<Classifier, ClassifierError> {
        let labels: Vec<String> = examples.iter()
            .map(|(_, label)| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        if labels.len() < 2 {
            return Err(ClassifierError::TooFewClasses(labels.len()));
        }
        let label_index: HashMap<&str, usize> = labels.iter().enumerate().map(|(i, l)| (l.as_str(), i)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut docs_per_label = vec![0usize; labels.len()];
        // Token counts per label, keyed by vocabulary index
        let mut counts: Vec<BTreeMap<usize, usize>> = vec![BTreeMap::new(); labels.len()];

        for (phrase, label) in examples {
            let Some(&l) = label_index.get(label.trim()) else { continue };
            docs_per_label[l] += 1;
            for token in tokenise(phrase) {
                let next_index = vocabulary.len();
                let t = *vocabulary.entry(token).or_insert(next_index);
                *counts[l].entry(t).or_insert(0) += 1;
            }
        }

        let total_docs: usize = docs_per_label.iter().sum();
        let vocab_size = vocabulary.len() as f64;
        let log_priors: Vec<f64> = docs_per_label.iter()
            .map(|&n| (n as f64 / total_docs as f64).ln())
            .collect();
        let log_likelihoods: Vec<Vec<f64>> = counts.iter()
            .map(|label_counts| {
                let label_total: usize = label_counts.values().sum();
                let denominator = label_total as f64 + ALPHA * vocab_size;
                (0..vocabulary.len())
                    .map(|t| {
                        let count = label_counts.get(&t).copied().unwrap_or(0) as f64;
                        ((count + ALPHA) / denominator).ln()
                    })
                    .collect::<Vec<f64>>()
            })
            .collect();

        info!("Category classifier trained on {} examples, {} categories, {} words",
            total_docs, labels.len(), vocabulary.len());

        Ok(Classifier { vocabulary, labels, log_priors, log_likelihoods })
    }

    /// Guess the category of a free text description. Always returns a label.
    pub(crate) fn predict(&self, description: &str) -> String {
        if description.trim().is_empty() {
            return FALLBACK_CATEGORY.to_string();
        }

        let known_tokens: Vec<usize> = tokenise(description).iter()
            .filter_map(|token| self.vocabulary.get(token).copied())
            .collect();

        let mut best: Option<(usize, f64)> = None;
        for (l, prior) in self.log_priors.iter().enumerate() {
            let score = prior + known_tokens.iter().map(|&t| self.log_likelihoods[l][t]).sum::<f64>();
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((l, score)),
            }
        }

        match best {
            Some((l, _)) => self.labels[l].clone(),
            None => FALLBACK_CATEGORY.to_string(),
        }
    }

    pub(crate) fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::train(&TRAINING_EXAMPLES).unwrap()
    }

    #[test]
    fn test_blank_description_is_misc() {
        let c = classifier();
        assert_eq!(c.predict(""), "Misc");
        assert_eq!(c.predict("   "), "Misc");
    }

    #[test]
    fn test_predict() {
        let c = classifier();
        assert_eq!(c.predict("pizza with friends"), "Food");
        assert_eq!(c.predict("taxi to airport"), "Travel");
        assert_eq!(c.predict("Electricity bill for March"), "Bills");
        assert_eq!(c.predict("netflix"), "Entertainment");
        assert_eq!(c.predict("new shirt"), "Shopping");
    }

    #[test]
    fn test_unseen_words_fall_back_to_prior() {
        // Every label has 5 examples so priors tie and the first label wins
        let c = classifier();
        assert_eq!(c.predict("zzz qqq"), "Bills");
    }

    #[test]
    fn test_too_few_classes() {
        let result = Classifier::train(&[("lunch", "Food"), ("dinner", "Food")]);
        assert_eq!(result.unwrap_err(), ClassifierError::TooFewClasses(1));
    }

    #[test]
    fn test_extra_examples() {
        let extra = vec![
            ("gym membership".to_string(), "Health".to_string()),
            ("yoga class".to_string(), "Health".to_string()),
        ];
        let c = Classifier::with_extra_examples(&extra).unwrap();
        assert!(c.labels().contains(&"Health".to_string()));
        assert_eq!(c.predict("yoga gym"), "Health");
    }

    #[test]
    fn test_deterministic() {
        let a = classifier();
        let b = classifier();
        for phrase in ["bus", "movie night", "rent", "coffee"] {
            assert_eq!(a.predict(phrase), b.predict(phrase));
        }
    }
}
