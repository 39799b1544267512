use clap::Parser;
use moody_quiz::{read_bulk, Error, MOODS};
use std::fs::File;
use std::io::BufReader;

#[derive(Parser)]
struct Args {
    path: String,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let reader = BufReader::new(File::open(&args.path)?);
    for row in read_bulk(reader) {
        match row {
            Ok((id, sheet)) => match sheet.to_mood_scores(&MOODS) {
                Ok(scores) => {
                    println!(
                        "id = {}, mood = {}, totals = {:?}",
                        id,
                        scores.winner(),
                        scores.totals()
                    );
                }
                Err(e) => {
                    dbg!("{}", e);
                }
            },
            Err(e) => {
                dbg!("{}", e);
            }
        }
    }
    Ok(())
}
