use std::collections::HashSet;

use lazy_static::lazy_static;
use log::debug;
use tokenizers::{normalizers::BertNormalizer, pre_tokenizers::bert::BertPreTokenizer, NormalizedString, Normalizer, OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

lazy_static! {
    static ref IGNORED_TOKENS: HashSet<&'static str> = {
        let mut ignored_tokens = HashSet::new();
        ignored_tokens.insert("*");
        ignored_tokens.insert(",");
        ignored_tokens.insert(".");
        ignored_tokens.insert("&");
        ignored_tokens.insert("-");
        ignored_tokens.insert("_");
        ignored_tokens.insert("(");
        ignored_tokens.insert(")");
        ignored_tokens.insert("/");
        ignored_tokens.insert("'");
        ignored_tokens.insert("!");
        ignored_tokens.insert("?");

        ignored_tokens
    };
}

/// Split free text into lowercase word tokens, dropping punctuation.
pub(crate) fn tokenise(text: &str) -> Vec<String> {
    match bert_tokenise(text) {
        Ok(tokens) => tokens,
        Err(e) => {
            debug!("Falling back to whitespace tokenisation for {:?}: {}", text, e);
            text.split(|c: char| !c.is_alphanumeric())
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase)
                .collect()
        }
    }
}

fn bert_tokenise(text: &str) -> tokenizers::Result<Vec<String>> {
    let normaliser = BertNormalizer::new(true, true, None, true);
    let mut normalised = NormalizedString::from(text);
    normaliser.normalize(&mut normalised)?;

    let pre_tokenizer = BertPreTokenizer {};
    let mut pre_tokenized = PreTokenizedString::from(normalised.get());
    pre_tokenizer.pre_tokenize(&mut pre_tokenized)?;

    Ok(pre_tokenized.get_splits(OffsetReferential::Original, OffsetType::Byte)
        .into_iter()
        .filter_map(|s| {
            if IGNORED_TOKENS.contains(s.0) {
                None
            } else {
                Some(s.0.to_string())
            }
        })
        .collect())
}
