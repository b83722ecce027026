use serde::{Deserialize, Serialize};

/// One voter's standing on a proposal or disaster request.
///
/// `vote_type` is only meaningful while `voted` is true: `Some(true)` is an
/// approval, `Some(false)` a rejection. Lookups that fail for any reason
/// collapse to [`VoteRecord::not_voted`] so a read fault can never unlock a
/// second vote in a caller's UI.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub voted: bool,
    pub vote_type: Option<bool>,
}

impl VoteRecord {
    /// The fail-closed record: no vote on file.
    #[must_use]
    pub const fn not_voted() -> Self {
        Self {
            voted: false,
            vote_type: None,
        }
    }

    #[must_use]
    pub const fn cast(approve: bool) -> Self {
        Self {
            voted: true,
            vote_type: Some(approve),
        }
    }
}
