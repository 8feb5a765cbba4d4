use crate::error::{Result, TimetableError};

/// Which referees examine which matches. Row-major `match × referee`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMatchRefereeMatrix"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRefereeMatrix {
    match_count: usize,
    referee_count: usize,
    cells: Vec<bool>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatchRefereeMatrix {
    match_count: usize,
    referee_count: usize,
    cells: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMatchRefereeMatrix> for MatchRefereeMatrix {
    type Error = TimetableError;

    fn try_from(raw: RawMatchRefereeMatrix) -> Result<Self> {
        if raw.cells.len() != raw.match_count * raw.referee_count {
            return Err(TimetableError::Dimension(format!(
                "Match-referee matrix of {}x{} holds {} cells",
                raw.match_count,
                raw.referee_count,
                raw.cells.len()
            )));
        }
        Ok(Self {
            match_count: raw.match_count,
            referee_count: raw.referee_count,
            cells: raw.cells,
        })
    }
}

impl MatchRefereeMatrix {
    /// Creates a matrix in which nobody examines anything.
    pub fn empty(match_count: usize, referee_count: usize) -> Self {
        Self {
            match_count,
            referee_count,
            cells: vec![false; match_count * referee_count],
        }
    }

    /// Builds the matrix from one row per match.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let match_count = rows.len();
        let referee_count = rows.first().map_or(0, Vec::len);

        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != referee_count)
        {
            return Err(TimetableError::Dimension(format!(
                "Match {} lists {} referees, expected {}",
                idx,
                row.len(),
                referee_count
            )));
        }

        Ok(Self {
            match_count,
            referee_count,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    pub fn referee_count(&self) -> usize {
        self.referee_count
    }

    pub fn examines(&self, match_index: usize, referee: usize) -> bool {
        self.cells[match_index * self.referee_count + referee]
    }

    pub(crate) fn set(&mut self, match_index: usize, referee: usize) {
        self.cells[match_index * self.referee_count + referee] = true;
    }

    /// Matches examined by `referee`, ascending.
    pub fn matches_of(&self, referee: usize) -> Vec<usize> {
        (0..self.match_count)
            .filter(|&m| self.examines(m, referee))
            .collect()
    }

    /// Referees examining `match_index`, ascending.
    pub fn referees_of(&self, match_index: usize) -> Vec<usize> {
        (0..self.referee_count)
            .filter(|&r| self.examines(match_index, r))
            .collect()
    }
}

/// Pairs of matches that share at least one referee and therefore must not
/// run at the same time of day.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawConflictMatrix"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictMatrix {
    match_count: usize,
    cells: Vec<bool>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawConflictMatrix {
    match_count: usize,
    cells: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConflictMatrix> for ConflictMatrix {
    type Error = TimetableError;

    fn try_from(raw: RawConflictMatrix) -> Result<Self> {
        let n = raw.match_count;
        if raw.cells.len() != n * n {
            return Err(TimetableError::Dimension(format!(
                "Conflict matrix of {} matches holds {} cells",
                n,
                raw.cells.len()
            )));
        }
        Self::from_rows(raw.cells.chunks(n.max(1)).map(<[bool]>::to_vec).collect())
    }
}

impl ConflictMatrix {
    /// Derives the conflicts from shared referees. The diagonal is always clear.
    pub fn derive(match_referee: &MatchRefereeMatrix) -> Self {
        let n = match_referee.match_count();
        let mut cells = vec![false; n * n];

        for a in 0..n {
            for b in (a + 1)..n {
                let shared = (0..match_referee.referee_count())
                    .any(|r| match_referee.examines(a, r) && match_referee.examines(b, r));
                cells[a * n + b] = shared;
                cells[b * n + a] = shared;
            }
        }

        Self {
            match_count: n,
            cells,
        }
    }

    /// Accepts a loader-supplied matrix. It must be square, symmetric and have
    /// a clear diagonal.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return Err(TimetableError::Dimension(
                "Conflict matrix must be square".to_string(),
            ));
        }

        for a in 0..n {
            if rows[a][a] {
                return Err(TimetableError::Dimension(format!(
                    "Conflict matrix marks match {} as conflicting with itself",
                    a
                )));
            }
            for b in (a + 1)..n {
                if rows[a][b] != rows[b][a] {
                    return Err(TimetableError::Dimension(format!(
                        "Conflict matrix is not symmetric at ({}, {})",
                        a, b
                    )));
                }
            }
        }

        Ok(Self {
            match_count: n,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    pub fn conflicts(&self, a: usize, b: usize) -> bool {
        self.cells[a * self.match_count + b]
    }

    /// Matches that share a referee with `match_index`, ascending.
    pub fn conflicting_matches(&self, match_index: usize) -> Vec<usize> {
        (0..self.match_count)
            .filter(|&other| self.conflicts(match_index, other))
            .collect()
    }
}
