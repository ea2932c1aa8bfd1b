use serde::{Deserialize, Serialize};

/// Position of a queue on its two axes: open/closed and empty/non-empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    OpenEmpty,
    OpenNonEmpty,
    ClosedNonEmpty,
    /// Terminal: blocking consumers return nothing and pushes fail from here on.
    ClosedEmpty,
}

/// Length and closed flag, read under a single lock acquisition.
///
/// Stale as soon as it is returned; useful for reporting, not for deciding
/// whether a following pop will succeed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub len: usize,
    pub closed: bool,
}

impl Snapshot {
    pub fn phase(&self) -> Phase {
        match (self.closed, self.len == 0) {
            (false, true) => Phase::OpenEmpty,
            (false, false) => Phase::OpenNonEmpty,
            (true, false) => Phase::ClosedNonEmpty,
            (true, true) => Phase::ClosedEmpty,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase() == Phase::ClosedEmpty
    }
}

#[cfg(test)]
mod tests {
    use super::{Phase, Snapshot};

    #[test]
    fn phase_follows_both_axes() {
        let cases = [
            (0, false, Phase::OpenEmpty),
            (3, false, Phase::OpenNonEmpty),
            (3, true, Phase::ClosedNonEmpty),
            (0, true, Phase::ClosedEmpty),
        ];
        for (len, closed, expected) in cases {
            let snapshot = Snapshot { len, closed };
            assert_eq!(snapshot.phase(), expected, "len={len} closed={closed}");
            assert_eq!(snapshot.is_terminal(), expected == Phase::ClosedEmpty);
        }
    }

    #[test]
    fn serializes_as_plain_json() {
        let snapshot = Snapshot { len: 2, closed: true };
        let json = serde_json::to_string(&snapshot).expect("Serialization failed");
        assert_eq!(json, r#"{"len":2,"closed":true}"#);

        let phase = serde_json::to_string(&snapshot.phase()).expect("Serialization failed");
        assert_eq!(phase, r#""closed_non_empty""#);
        let back: Phase = serde_json::from_str(&phase).expect("Deserialization failed");
        assert_eq!(back, Phase::ClosedNonEmpty);
    }
}
