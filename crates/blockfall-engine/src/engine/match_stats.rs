use std::time::Duration;

/// Base points for line clears, indexed by lines cleared in one settle.
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// The awarded amount is the base multiplied by the level the match was at
/// before the clear.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

const LINES_PER_LEVEL: usize = 10;

const BASE_GRAVITY_INTERVAL: Duration = Duration::from_millis(1000);
const GRAVITY_STEP_PER_LEVEL: Duration = Duration::from_millis(100);
const MIN_GRAVITY_INTERVAL: Duration = Duration::from_millis(50);

/// Returns the time between automatic drops at `level`.
///
/// Starts at 1000 ms on level 1 and loses 100 ms per level, never going
/// below 50 ms.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::gravity_interval;
///
/// assert_eq!(gravity_interval(1), Duration::from_millis(1000));
/// assert_eq!(gravity_interval(4), Duration::from_millis(700));
/// assert_eq!(gravity_interval(10), Duration::from_millis(100));
/// assert_eq!(gravity_interval(11), Duration::from_millis(50));
/// assert_eq!(gravity_interval(50), Duration::from_millis(50));
/// ```
#[must_use]
pub fn gravity_interval(level: usize) -> Duration {
    let steps = u32::try_from(level.saturating_sub(1)).unwrap_or(u32::MAX);
    BASE_GRAVITY_INTERVAL
        .saturating_sub(GRAVITY_STEP_PER_LEVEL.saturating_mul(steps))
        .max(MIN_GRAVITY_INTERVAL)
}

/// Score, level and line statistics of a match.
///
/// - **Score**: points from line clears, scaled by level
/// - **Level**: 1 plus one level per 10 lines cleared
/// - **Completed pieces**: number of settled pieces
/// - **Line clear distribution**: settles grouped by lines cleared
///
/// Every counter only ever grows within a match.
///
/// # Example
///
/// ```
/// use blockfall_engine::MatchStats;
///
/// let mut stats = MatchStats::new();
/// assert_eq!(stats.record_settle(4), 800);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.lines_cleared_total(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchStats {
    score: usize,
    lines_cleared_total: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for MatchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            lines_cleared_total: 0,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.lines_cleared_total / LINES_PER_LEVEL + 1
    }

    #[must_use]
    pub const fn lines_cleared_total(&self) -> usize {
        self.lines_cleared_total
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of settles by lines cleared.
    ///
    /// Index 0 counts settles that cleared nothing, index 4 counts tetrises.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Returns the gravity interval for the current level.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        gravity_interval(self.level())
    }

    /// Records one settled piece that cleared `cleared_lines` rows and
    /// returns the points awarded.
    ///
    /// Points use the level before the clear is counted. Clears of more than
    /// four rows cannot come from a single tetromino and score nothing.
    pub fn record_settle(&mut self, cleared_lines: usize) -> usize {
        let points = SCORE_TABLE.get(cleared_lines).copied().unwrap_or(0) * self.level();
        self.score += points;
        self.lines_cleared_total += cleared_lines;
        self.completed_pieces += 1;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        points
    }
}
