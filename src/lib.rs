use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The Moody discovery quiz asks exactly five questions.
pub const QUESTION_COUNT: usize = 5;

/// Tie-break order of the fifteen moods. The weight table must declare its
/// moods in exactly this order; `MoodScores::winner` scans it front to back
/// and a later mood only displaces the leader with a strictly higher score.
pub const MOOD_ORDER: [&str; 15] = [
    "Creative",
    "Anxious",
    "Fragile",
    "Playful",
    "Muddled",
    "Wired",
    "Caring",
    "Open",
    "Serene",
    "Mellow",
    "Eccentric",
    "Vulnerable",
    "Curious",
    "Unhinged",
    "Freespirited",
];

/// Initial leader of the winner scan; returned when every mood scores zero.
pub const DEFAULT_MOOD: &str = "Creative";

pub static QUESTIONS: Lazy<QuestionSet> = Lazy::new(|| {
    let f = std::fs::File::open("resources/questions.json").unwrap();
    let reader = std::io::BufReader::new(f);
    serde_json::from_reader(reader).unwrap()
});

pub static MOODS: Lazy<MoodTable> = Lazy::new(|| {
    let f = std::fs::File::open("resources/moods.json").unwrap();
    let reader = std::io::BufReader::new(f);
    let table: MoodTable = serde_json::from_reader(reader).unwrap();
    table.validate(&QUESTIONS).unwrap();
    table
});

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub letter: char,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub choices: Vec<Choice>,
}

/// Quiz master data: the five questions, each with four lettered choices.
#[derive(Debug, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Look up a question by its ordinal id.
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// One mood and the composite keys ("<questionId><letter>") that feed it.
#[derive(Debug, Clone, Deserialize)]
pub struct MoodWeights {
    pub name: String,
    pub weights: HashMap<String, u32>,
}

/// The fifteen-mood weight table, in declaration order.
#[derive(Debug, Clone, Deserialize)]
pub struct MoodTable {
    pub moods: Vec<MoodWeights>,
}

impl MoodTable {
    /// Checks the table against the question master before it is ever scored:
    /// mood names must match [`MOOD_ORDER`] exactly, every composite key must
    /// reference an existing question and one of its four letters, and every
    /// weight must be positive. A key that fails here would otherwise just
    /// never match at scoring time and silently under-score its mood.
    pub fn validate(&self, questions: &QuestionSet) -> Result<(), Error> {
        if self.moods.len() != MOOD_ORDER.len() {
            return Err(Error::MoodOrder);
        }
        for (entry, expected) in self.moods.iter().zip(MOOD_ORDER) {
            if entry.name != expected {
                return Err(Error::MoodOrder);
            }
        }
        for mood in &self.moods {
            for (key, &weight) in &mood.weights {
                if weight == 0 {
                    return Err(Error::ZeroWeight(key.clone()));
                }
                let (id, letter) =
                    split_key(key).ok_or_else(|| Error::BadWeightKey(key.clone()))?;
                let question = questions
                    .question(id)
                    .ok_or_else(|| Error::BadWeightKey(key.clone()))?;
                if !question.choices.iter().any(|choice| choice.letter == letter) {
                    return Err(Error::BadWeightKey(key.clone()));
                }
            }
        }
        Ok(())
    }
}

/// Composite key used to index a mood's weight map.
pub fn composite_key(question_id: u32, letter: char) -> String {
    format!("{}{}", question_id, letter)
}

fn split_key(key: &str) -> Option<(u32, char)> {
    let letter = key.chars().next_back()?;
    if !letter.is_ascii_lowercase() {
        return None;
    }
    let id = key[..key.len() - 1].parse::<u32>().ok()?;
    Some((id, letter))
}

/// Route slug of the mood-filtered product page, e.g. "Serene" => "/mood/serene".
pub fn route_slug(mood: &str) -> String {
    mood.to_ascii_lowercase()
}

#[derive(Debug, Clone)]
pub struct AnswerSheet {
    values: [Option<char>; QUESTION_COUNT],
    offset: usize,
}

impl Default for AnswerSheet {
    fn default() -> Self {
        Self {
            values: [None; QUESTION_COUNT],
            offset: 0,
        }
    }
}

impl AnswerSheet {
    /// Store the next answer in question order.
    /// Only the letters a through d are accepted.
    pub fn push(&mut self, letter: char) -> Result<(), Error> {
        if ('a'..='d').contains(&letter) {
            if self.offset < QUESTION_COUNT {
                self.values[self.offset] = Some(letter);
                self.offset += 1;
                Ok(())
            } else {
                Err(Error::IllegalQuestion)
            }
        } else {
            Err(Error::IllegalAnswer)
        }
    }

    /// Store an answer for a specific question number.
    /// Answering the same question again overwrites the earlier choice.
    pub fn insert(&mut self, question_no: u32, letter: char) -> Result<(), Error> {
        if question_no < 1 {
            return Err(Error::IllegalQuestion);
        }
        if ('a'..='d').contains(&letter) {
            let offset = (question_no - 1) as usize;
            if offset < QUESTION_COUNT {
                self.values[offset] = Some(letter);
                Ok(())
            } else {
                Err(Error::IllegalQuestion)
            }
        } else {
            Err(Error::IllegalAnswer)
        }
    }

    /// Scores the completed sheet against a weight table.
    ///
    /// Every mood starts at zero; for each answered question the composite
    /// key "<questionId><letter>" is looked up in every mood's weight map and
    /// the matching weights are added. A sheet with any unanswered question
    /// is rejected rather than scored partially.
    pub fn to_mood_scores(&self, table: &MoodTable) -> Result<MoodScores, Error> {
        if self.values.iter().any(|value| value.is_none()) {
            return Err(Error::NotFullfilled);
        }
        let mut totals = table
            .moods
            .iter()
            .map(|mood| (mood.name.clone(), 0))
            .collect::<Vec<(String, u32)>>();
        for (index, letter) in self.values.iter().enumerate() {
            let letter = letter.ok_or(Error::NotFullfilled)?;
            let key = composite_key(index as u32 + 1, letter);
            for (total, mood) in totals.iter_mut().zip(&table.moods) {
                if let Some(weight) = mood.weights.get(&key) {
                    total.1 += weight;
                }
            }
        }
        Ok(MoodScores { totals })
    }
}

/// Per-quiz score accumulator, totals held in table declaration order.
#[derive(Debug)]
pub struct MoodScores {
    totals: Vec<(String, u32)>,
}

impl MoodScores {
    /// The recommended mood: first mood in declaration order attaining the
    /// highest total. The scan starts from ("Creative", 0), so an all-zero
    /// sheet resolves to Creative and ties go to the earlier mood.
    pub fn winner(&self) -> &str {
        let mut best_mood = DEFAULT_MOOD;
        let mut best_score = 0;
        for (mood, score) in &self.totals {
            if *score > best_score {
                best_score = *score;
                best_mood = mood;
            }
        }
        best_mood
    }

    pub fn total(&self, mood: &str) -> Option<u32> {
        self.totals
            .iter()
            .find(|(name, _)| name == mood)
            .map(|(_, score)| *score)
    }

    pub fn totals(&self) -> &[(String, u32)] {
        &self.totals
    }
}

/// Read bulk answers from CSV. One row per respondent: an id column followed
/// by five answer letters.
pub fn read_bulk<R: std::io::Read>(
    reader: R,
) -> impl Iterator<Item = Result<(String, AnswerSheet), Error>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_records()
        .map(|record| {
            let record = record?;
            let mut fields = record.iter();
            let id = fields.next().ok_or(Error::NotFullfilled)?.to_string();
            let mut sheet = AnswerSheet::default();
            for field in fields {
                let letter = field.chars().next().ok_or(Error::IllegalAnswer)?;
                sheet.push(letter)?;
            }
            Ok((id, sheet))
        })
}

#[derive(Debug)]
pub enum Error {
    /// Question number outside the five-question set
    IllegalQuestion,
    /// Answer letter outside a..=d
    IllegalAnswer,
    /// Unanswered question remains
    NotFullfilled,
    /// Mood list does not match the declared order
    MoodOrder,
    /// Weight key references no known question/choice
    BadWeightKey(String),
    /// Weight is not a positive integer
    ZeroWeight(String),
    Io(std::io::Error),
    Csv(csv::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e)
    }
}
