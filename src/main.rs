use std::io::stdin;

use moody_quiz::{route_slug, AnswerSheet, Error, MOODS, QUESTIONS};

fn main() {
    let mut buffer = String::new();
    let mut sheet = AnswerSheet::default();

    println!("Mood Discovery Quiz");
    for question in QUESTIONS.questions() {
        println!();
        println!("{}. {}", question.id, question.text);
        for choice in &question.choices {
            println!("  {}) {}", choice.letter, choice.text);
        }
        loop {
            stdin().read_line(&mut buffer).unwrap();
            if store_answer(buffer.trim(), &mut sheet).is_err() {
                println!("Please answer with a single letter from a to d.");
                buffer.clear();
            } else {
                buffer.clear();
                break;
            }
        }
    }

    let scores = sheet.to_mood_scores(&MOODS).unwrap();
    let mood = scores.winner();
    println!();
    println!("Your mood: {}", mood);
    println!("Recommended products: /mood/{}", route_slug(mood));
}

fn store_answer(value: &str, sheet: &mut AnswerSheet) -> Result<(), Error> {
    let mut chars = value.chars();
    let letter = chars.next().ok_or(Error::IllegalAnswer)?;
    if chars.next().is_some() {
        return Err(Error::IllegalAnswer);
    }
    sheet.push(letter)?;
    Ok(())
}
