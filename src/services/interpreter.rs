/// Словесная интерпретация общих оценок. Применяется только к оценкам всего
/// текста; предложения классифицируются более грубой трехуровневой шкалой.
pub fn interpret(polarity: f64, subjectivity: f64) -> (&'static str, &'static str) {
    (interpret_polarity(polarity), interpret_subjectivity(subjectivity))
}

pub fn interpret_polarity(polarity: f64) -> &'static str {
    if polarity > 0.5 {
        "Very Positive"
    } else if polarity > 0.1 {
        "Positive"
    } else if polarity > -0.1 {
        "Neutral"
    } else if polarity > -0.5 {
        "Negative"
    } else {
        "Very Negative"
    }
}

pub fn interpret_subjectivity(subjectivity: f64) -> &'static str {
    if subjectivity > 0.7 {
        "Very Subjective (Opinion-based)"
    } else if subjectivity > 0.3 {
        "Moderately Subjective"
    } else {
        "Objective (Fact-based)"
    }
}
