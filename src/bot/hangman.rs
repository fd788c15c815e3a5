use std::collections::BTreeSet;

use crate::{AppError, AppResult};

pub const TOTAL_GUESSES: u32 = 10;

/// The server runs at most one game at a time, shared by every channel.
#[derive(Debug, Default)]
pub enum Hangman {
    #[default]
    Idle,
    InProgress(Game),
}

#[derive(Debug, Clone)]
pub struct Game {
    word: String,
    guessed: BTreeSet<char>,
    remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Won { word: String },
    Lost { word: String },
    Continue { status: String },
}

impl Game {
    fn new(word: &str) -> Self {
        Self {
            word: word.to_uppercase(),
            guessed: BTreeSet::new(),
            remaining: TOTAL_GUESSES,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// `_ A _ - You have 9 guesses remaining!`
    pub fn status(&self) -> String {
        let shown: Vec<String> = self
            .word
            .chars()
            .map(|c| if self.guessed.contains(&c) { c.to_string() } else { "_".to_owned() })
            .collect();
        format!("{} - You have {} guesses remaining!", shown.join(" "), self.remaining)
    }

    fn solved(&self) -> bool {
        self.word.chars().all(|c| self.guessed.contains(&c))
    }
}

impl Hangman {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress(_))
    }

    pub fn game(&self) -> Option<&Game> {
        match self {
            Self::InProgress(game) => Some(game),
            Self::Idle => None,
        }
    }

    pub fn start(&mut self, word: &str) -> String {
        let game = Game::new(word);
        let status = game.status();
        *self = Self::InProgress(game);
        status
    }

    /// `arg` is whatever followed `/guess`. One character guesses a letter,
    /// anything longer guesses the word. Both cost a turn; a malformed guess
    /// costs nothing.
    pub fn guess(&mut self, arg: &str) -> AppResult<Outcome> {
        let Self::InProgress(game) = self else {
            return Err(AppError::input(
                "No active hangman games.. please type /hangman start to start one!",
            ));
        };
        let Some(arg) = arg.strip_prefix(' ').filter(|a| !a.is_empty()) else {
            return Err(AppError::input("Invalid guess format. Please ensure it's /guess C"));
        };

        game.remaining -= 1;
        let mut letters = arg.chars();
        let won = match (letters.next(), letters.next()) {
            (Some(c), None) => {
                game.guessed.extend(c.to_uppercase());
                game.solved()
            }
            _ => arg.to_uppercase() == game.word,
        };

        let word = game.word.clone();
        let outcome = if won {
            Outcome::Won { word }
        } else if game.remaining == 0 {
            Outcome::Lost { word }
        } else {
            return Ok(Outcome::Continue { status: game.status() });
        };
        *self = Self::Idle;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guessing_every_letter_wins() {
        let mut hangman = Hangman::default();
        assert_eq!(hangman.start("rust"), "_ _ _ _ - You have 10 guesses remaining!");

        assert_eq!(
            hangman.guess(" r").unwrap(),
            Outcome::Continue { status: "R _ _ _ - You have 9 guesses remaining!".to_owned() }
        );
        hangman.guess(" U").unwrap();
        hangman.guess(" s").unwrap();
        assert_eq!(hangman.guess(" t").unwrap(), Outcome::Won { word: "RUST".to_owned() });
        assert!(!hangman.is_active());
    }

    #[test]
    fn whole_word_guess_ignores_case() {
        let mut hangman = Hangman::default();
        hangman.start("ferris");

        assert!(matches!(hangman.guess(" ferrit").unwrap(), Outcome::Continue { .. }));
        assert_eq!(hangman.game().unwrap().remaining(), 9);
        assert_eq!(hangman.guess(" FeRrIs").unwrap(), Outcome::Won { word: "FERRIS".to_owned() });
    }

    #[test]
    fn ten_misses_lose() {
        let mut hangman = Hangman::default();
        hangman.start("rust");

        for _ in 0..TOTAL_GUESSES - 1 {
            assert!(matches!(hangman.guess(" z").unwrap(), Outcome::Continue { .. }));
        }
        assert_eq!(hangman.guess(" z").unwrap(), Outcome::Lost { word: "RUST".to_owned() });
        assert!(matches!(hangman, Hangman::Idle));
    }

    #[test]
    fn malformed_guess_is_free() {
        let mut hangman = Hangman::default();
        hangman.start("rust");

        assert!(hangman.guess("").unwrap_err().is_input());
        assert!(hangman.guess(" ").unwrap_err().is_input());
        assert!(hangman.guess("x").unwrap_err().is_input());
        assert_eq!(hangman.game().unwrap().remaining(), TOTAL_GUESSES);
    }

    #[test]
    fn guessing_without_a_game_fails() {
        let mut hangman = Hangman::default();
        assert!(hangman.guess(" a").unwrap_err().is_input());
    }
}
