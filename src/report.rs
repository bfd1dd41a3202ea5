use serde::Serialize;

use crate::cases::Case;

// A question text that occurred more than once in its group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedQuestion {
    pub question: String,
    pub occurrences: usize,
}

/// Outcome counts for one case group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    pub case: Case,
    pub input: usize,
    pub kept: usize,
    pub dropped: usize,
    // distinct questions, in order of first appearance
    pub dropped_questions: Vec<DroppedQuestion>,
}

impl GroupReport {
    pub fn summary_line(&self) -> String {
        format!(
            "{:<10} {:>5} in  {:>5} kept  {:>5} dropped ({} duplicated question(s))",
            self.case.key(),
            self.input,
            self.kept,
            self.dropped,
            self.dropped_questions.len()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub groups: Vec<GroupReport>,
}

impl FilterReport {
    pub fn group(&self, case: Case) -> Option<&GroupReport> {
        self.groups.iter().find(|g| g.case == case)
    }

    pub fn total_input(&self) -> usize {
        self.groups.iter().map(|g| g.input).sum()
    }

    pub fn total_kept(&self) -> usize {
        self.groups.iter().map(|g| g.kept).sum()
    }

    pub fn total_dropped(&self) -> usize {
        self.groups.iter().map(|g| g.dropped).sum()
    }
}
