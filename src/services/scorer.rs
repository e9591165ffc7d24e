use crate::errors::Result;

/// Оценка одного предложения
#[derive(Debug, Clone)]
pub struct ScoredSentence {
    pub text: String,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Результат оценки всего текста: общая пара (polarity, subjectivity)
/// плюс упорядоченная разбивка по предложениям
#[derive(Debug, Clone)]
pub struct ScoredText {
    pub polarity: f64,
    pub subjectivity: f64,
    pub sentences: Vec<ScoredSentence>,
}

/// Внешняя способность оценки тональности. Контракт: polarity в [-1, 1],
/// subjectivity в [0, 1]. Любая реализация с этим контрактом взаимозаменяема,
/// в тестах используется детерминированная заглушка.
pub trait SentenceScorer: Send + Sync {
    fn score_text(&self, text: &str) -> Result<ScoredText>;
}

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic",
    "positive", "love", "best", "happy", "success", "beautiful", "awesome",
    "brilliant", "helpful", "perfect", "enjoy", "impressive", "win",
    "breakthrough", "gain", "growth", "improve", "inspiring", "favorite",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "negative", "hate", "worst",
    "sad", "failure", "ugly", "boring", "useless", "broken", "problem",
    "loss", "decline", "wrong", "disappointing", "annoying", "crisis",
    "fear", "angry", "painful", "scam", "disaster",
];

const OPINION_WORDS: &[&str] = &[
    "think", "feel", "believe", "opinion", "probably", "maybe", "seems",
    "should", "must", "definitely", "honestly", "personally", "really",
    "very", "absolutely", "totally",
];

const NEGATION_WORDS: &[&str] = &["not", "never", "no", "dont", "cant", "wont", "isnt"];

/// Лексический оценщик тональности. Сегментирует текст по знакам конца
/// предложения и считает полярность по словарям с учетом отрицаний.
#[derive(Clone, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        LexiconScorer
    }

    fn split_sentences(text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            current.push(ch);
            if ch == '.' || ch == '!' || ch == '?' {
                let trimmed = current.trim();
                if !trimmed.is_empty() && trimmed.chars().any(|c| c.is_alphanumeric()) {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
            }
        }

        // Хвост без завершающего знака тоже считается предложением
        let trimmed = current.trim();
        if !trimmed.is_empty() && trimmed.chars().any(|c| c.is_alphanumeric()) {
            sentences.push(trimmed.to_string());
        }

        sentences
    }

    fn score_unit(text: &str) -> (f64, f64) {
        let text_lower = text.to_lowercase();
        let words: Vec<String> = text_lower
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .map(|w| w.replace('\'', ""))
            .collect();

        if words.is_empty() {
            return (0.0, 0.0);
        }

        let mut positive_count = 0usize;
        let mut negative_count = 0usize;
        let mut opinion_count = 0usize;

        for (i, word) in words.iter().enumerate() {
            let negated = i > 0 && NEGATION_WORDS.contains(&words[i - 1].as_str());

            if POSITIVE_WORDS.contains(&word.as_str()) {
                if negated {
                    negative_count += 1;
                } else {
                    positive_count += 1;
                }
            } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                if negated {
                    positive_count += 1;
                } else {
                    negative_count += 1;
                }
            }

            if OPINION_WORDS.contains(&word.as_str()) {
                opinion_count += 1;
            }
        }

        let hits = positive_count + negative_count;
        let polarity = if hits == 0 {
            0.0
        } else {
            (positive_count as f64 - negative_count as f64) / hits as f64
        };

        let subjectivity =
            (((hits + opinion_count) * 4) as f64 / words.len() as f64).min(1.0);

        (polarity, subjectivity)
    }
}

impl SentenceScorer for LexiconScorer {
    fn score_text(&self, text: &str) -> Result<ScoredText> {
        // Общая оценка считается один раз по всему тексту как единому целому,
        // отдельно от среднего по предложениям
        let (polarity, subjectivity) = Self::score_unit(text);

        let sentences = Self::split_sentences(text)
            .into_iter()
            .map(|sentence| {
                let (p, s) = Self::score_unit(&sentence);
                ScoredSentence {
                    text: sentence,
                    polarity: p,
                    subjectivity: s,
                }
            })
            .collect();

        Ok(ScoredText {
            polarity,
            subjectivity,
            sentences,
        })
    }
}
