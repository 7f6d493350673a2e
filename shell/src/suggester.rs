//! "Did you mean" suggestions for mistyped command names.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::command::Command;

/// Default minimum similarity percentage for [`SimilarTextSuggester`].
pub const DEFAULT_PERCENTAGE: f64 = 60.0;

/// Picks the registered command closest to a mistyped name.
pub trait Suggester {
    /// Returns the best match for `phrase`, or `None` when nothing is close
    /// enough.
    fn suggest<'c>(&self, phrase: &str, commands: &'c [Command]) -> Option<&'c Command>;
}

/// Suggests by percentage of shared characters.
///
/// Similarity is `2 * common / (len(a) + len(b)) * 100`, where `common` is
/// found by repeatedly taking the longest common substring and recursing into
/// the parts to its left and right. An exact match wins immediately;
/// otherwise the highest score at or above the threshold wins, the first
/// command on ties.
///
/// # Examples
///
/// ```
/// use shellkit::{Command, SimilarTextSuggester, Suggester};
/// use shellkit_core::Definition;
///
/// let commands = vec![
///     Command::new("build", "", Definition::new()),
///     Command::new("deploy", "", Definition::new()),
/// ];
/// let suggester = SimilarTextSuggester::default();
///
/// assert_eq!(suggester.suggest("biuld", &commands).map(Command::name), Some("build"));
/// assert!(suggester.suggest("zzz", &commands).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarTextSuggester {
    percentage: f64,
}

impl Default for SimilarTextSuggester {
    fn default() -> Self {
        Self::new(DEFAULT_PERCENTAGE)
    }
}

impl SimilarTextSuggester {
    /// Creates a suggester with a minimum similarity in percent.
    pub fn new(percentage: f64) -> Self {
        Self { percentage }
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

impl Suggester for SimilarTextSuggester {
    fn suggest<'c>(&self, phrase: &str, commands: &'c [Command]) -> Option<&'c Command> {
        let mut closest = None;
        let mut best = 0.0;

        for command in commands {
            let score = similarity(phrase, command.name());
            if score < self.percentage {
                continue;
            }
            if score >= 100.0 {
                return Some(command);
            }
            if score > best {
                closest = Some(command);
                best = score;
            }
        }

        closest
    }
}

/// Similarity of two strings in percent (0 to 100).
///
/// # Examples
///
/// ```
/// use shellkit::similarity;
///
/// assert_eq!(similarity("build", "build"), 100.0);
/// assert_eq!(similarity("biuld", "build"), 80.0);
/// assert_eq!(similarity("", ""), 0.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    (common_chars(&a, &b) * 2) as f64 * 100.0 / total as f64
}

fn common_chars(a: &[char], b: &[char]) -> usize {
    let (mut pos_a, mut pos_b, mut max) = (0, 0, 0);
    for i in 0..a.len() {
        for j in 0..b.len() {
            let len = a[i..]
                .iter()
                .zip(&b[j..])
                .take_while(|(x, y)| x == y)
                .count();
            if len > max {
                (pos_a, pos_b, max) = (i, j, len);
            }
        }
    }

    if max == 0 {
        return 0;
    }

    max + common_chars(&a[..pos_a], &b[..pos_b])
        + common_chars(&a[pos_a + max..], &b[pos_b + max..])
}

/// Suggests with skim-style fuzzy matching.
///
/// Matches when the characters of the phrase appear in order in the command
/// name (`dpl` matches `deploy`). The highest score at or above
/// `min_score` wins.
///
/// # Examples
///
/// ```
/// use shellkit::{Command, FuzzySuggester, Suggester};
/// use shellkit_core::Definition;
///
/// let commands = vec![
///     Command::new("build", "", Definition::new()),
///     Command::new("deploy", "", Definition::new()),
/// ];
///
/// let suggester = FuzzySuggester::default();
/// assert_eq!(suggester.suggest("dpl", &commands).map(Command::name), Some("deploy"));
/// assert!(suggester.suggest("xyz", &commands).is_none());
/// ```
#[derive(Default)]
pub struct FuzzySuggester {
    matcher: SkimMatcherV2,
    min_score: i64,
}

impl FuzzySuggester {
    pub fn new(min_score: i64) -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
            min_score,
        }
    }
}

impl Suggester for FuzzySuggester {
    fn suggest<'c>(&self, phrase: &str, commands: &'c [Command]) -> Option<&'c Command> {
        commands
            .iter()
            .filter_map(|command| {
                self.matcher
                    .fuzzy_match(command.name(), phrase)
                    .map(|score| (score, command))
            })
            .filter(|(score, _)| *score >= self.min_score)
            .fold(None, |best: Option<(i64, &Command)>, (score, command)| match best {
                Some((top, _)) if top >= score => best,
                _ => Some((score, command)),
            })
            .map(|(_, command)| command)
    }
}
