//! Usage review
//!
//! Walks the review queue one item at a time and asks whether it was used.

use std::io::{BufRead, Write};

use clutterlog_core::commands::{answer_review, review_queue};
use clutterlog_core::domain::ReviewAnswer;
use clutterlog_core::AppState;

use super::fail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Response {
    Answer(ReviewAnswer),
    Skip,
    Quit,
}

fn parse_response(line: &str) -> Option<Response> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(Response::Answer(ReviewAnswer::Yes)),
        "n" | "no" => Some(Response::Answer(ReviewAnswer::No)),
        "s" | "skip" => Some(Response::Skip),
        "q" | "quit" => Some(Response::Quit),
        _ => None,
    }
}

pub async fn run<R: BufRead, W: Write>(state: &AppState, input: &mut R, out: &mut W) -> anyhow::Result<()> {
    let mut queue = review_queue(state).await.map_err(fail)?;
    if queue.is_empty() {
        writeln!(out, "No items need checking!")?;
        return Ok(());
    }
    writeln!(out, "{} item(s) to check.", queue.len())?;

    let mut answered = 0;
    while let Some(item) = queue.front().cloned() {
        write!(
            out,
            "Did you use {} [{}] in the last 30 days? (y)es/(n)o/(s)kip/(q)uit: ",
            item.name, item.category
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        match parse_response(&line) {
            Some(Response::Answer(answer)) => {
                answer_review(state, &mut queue, &item.id, answer).await.map_err(fail)?;
                answered += 1;
            }
            Some(Response::Skip) => {
                queue.skip(&item.id);
            }
            Some(Response::Quit) => break,
            None => writeln!(out, "Please answer y, n, s or q.")?,
        }
    }

    writeln!(out, "Checked {} item(s), {} left.", answered, queue.len())?;
    Ok(())
}
