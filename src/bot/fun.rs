use anyhow::anyhow;
use rand::{Rng, seq::IndexedRandom};
use time::{OffsetDateTime, macros::format_description};

use crate::{AppError, AppResult};

pub(super) fn time_now() -> AppResult<String> {
    let now = OffsetDateTime::now_utc()
        .format(format_description!(
            "[weekday] [day padding:none] [month repr:long] [year], [hour repr:12 padding:none]:[minute] [period]"
        ))
        .map_err(|e| anyhow!("formatting the time: {e}"))?;
    Ok(format!("The current time is {now}."))
}

pub(super) fn flip() -> String {
    let side = if rand::rng().random_bool(0.5) { "heads" } else { "tails" };
    format!("It appears to be {side}!")
}

pub(super) fn choose(args: &str) -> AppResult<String> {
    let options: Vec<&str> = args.split_whitespace().collect();
    let choice = options
        .choose(&mut rand::rng())
        .ok_or_else(|| AppError::input("Please give me some options, like /choose A B C"))?;
    Ok(format!("Hmm.. tough choice.. but I choose {choice}"))
}

/// A bad side count gets usage advice as the reply, not a failure.
pub(super) fn dice(args: &str) -> String {
    let args = args.trim();
    let sides = if args.is_empty() {
        6
    } else {
        match args.parse::<u32>() {
            Ok(sides) if sides > 0 => sides,
            _ => {
                return "Please provide a valid number for /dice X, or just /dice for a six-sided dice!"
                    .to_owned();
            }
        }
    };
    let roll = rand::rng().random_range(1..=sides);
    format!("Rolling a {sides}-sided dice.. and got {roll}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dice_defaults_to_six() {
        let msg = dice("");
        assert!(msg.starts_with("Rolling a 6-sided dice.. and got "));
        let roll: u32 = msg.rsplit(' ').next().unwrap().parse().unwrap();
        assert!((1..=6).contains(&roll));
    }

    #[test]
    fn dice_explains_nonsense() {
        for args in [" X", " 0", " -3"] {
            assert!(dice(args).starts_with("Please provide a valid number for /dice X"), "{args:?}");
        }
        assert!(dice(" 10").starts_with("Rolling a 10-sided dice"));
    }

    #[test]
    fn choose_picks_an_option() {
        let msg = choose(" A B C").unwrap();
        assert!(["A", "B", "C"].iter().any(|o| msg.ends_with(&format!("I choose {o}"))));
        assert!(choose("").unwrap_err().is_input());
    }

    #[test]
    fn time_reads_like_a_sentence() {
        let msg = time_now().unwrap();
        assert!(msg.starts_with("The current time is "));
        assert!(msg.ends_with("AM.") || msg.ends_with("PM."));
    }
}
