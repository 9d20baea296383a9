use serde::{Deserialize, Serialize};

/// How a cluster's members are walked during a reassignment pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberScan {
    /// Copy the member list when the cluster's turn starts and visit every copied member
    #[default]
    Snapshot,
    /// Walk the live member list with a cursor that always advances, so the member
    /// sliding into a removed point's slot is skipped until the next pass
    LiveCursor,
}

// Settings for one clustering engine: RNG seed and member scan mode
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineContext {
    pub seed: u64,
    #[serde(default)]
    pub member_scan: MemberScan,
}

impl EngineContext {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            member_scan: MemberScan::default(),
        }
    }

    pub fn with_member_scan(mut self, member_scan: MemberScan) -> Self {
        self.member_scan = member_scan;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_scan_defaults_to_snapshot() {
        let context: EngineContext = serde_json::from_str(r#"{"seed": 3}"#).unwrap();
        assert_eq!(context, EngineContext::new(3));
        assert_eq!(context.member_scan, MemberScan::Snapshot);

        let context: EngineContext =
            serde_json::from_str(r#"{"seed": 3, "member_scan": "LiveCursor"}"#).unwrap();
        assert_eq!(
            context,
            EngineContext::new(3).with_member_scan(MemberScan::LiveCursor)
        );
    }
}
