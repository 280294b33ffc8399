//! Gang admission.
//!
//! A job that names a group may only be considered for placement once the
//! group has at least `minAvailable` known members. Jobs without a group
//! bypass the check entirely.
//!
//! The check is a pure predicate over the job and a membership snapshot.
//! The snapshot may be stale; a rejected job is simply re-presented by the
//! host on a later cycle.

use std::fmt;
use std::sync::Arc;

use podgang_core::{GroupMembershipSource, GroupSnapshot, Job, LookupError, QuorumError};

/// Outcome of the admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Admit,
    Reject(RejectReason),
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admit)
    }
}

/// Why a job was turned away for this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Fewer members are known than the quorum requires.
    InsufficientMembership {
        group: String,
        required: u64,
        present: usize,
    },
    /// The quorum label was missing or not a non-negative integer.
    InvalidQuorum { group: String, error: QuorumError },
    /// Group membership could not be read.
    MembershipUnavailable { group: String, error: LookupError },
}

impl RejectReason {
    /// Short, stable description suitable for a status message.
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::InsufficientMembership { .. } => "insufficient group membership",
            RejectReason::InvalidQuorum { .. } => "invalid quorum specification",
            RejectReason::MembershipUnavailable { .. } => "group membership unavailable",
        }
    }

    /// Metric label for this reason.
    pub fn kind(&self) -> &'static str {
        match self {
            RejectReason::InsufficientMembership { .. } => "insufficient_membership",
            RejectReason::InvalidQuorum { .. } => "invalid_quorum",
            RejectReason::MembershipUnavailable { .. } => "membership_unavailable",
        }
    }

    /// True when the rejection points at bad metadata or a broken source
    /// rather than a group that is still filling up.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            RejectReason::InvalidQuorum { .. } | RejectReason::MembershipUnavailable { .. }
        )
    }

    pub fn group(&self) -> &str {
        match self {
            RejectReason::InsufficientMembership { group, .. }
            | RejectReason::InvalidQuorum { group, .. }
            | RejectReason::MembershipUnavailable { group, .. } => group,
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::InsufficientMembership {
                group,
                required,
                present,
            } => write!(
                f,
                "{}: group {group} has {present} of {required} members",
                self.message()
            ),
            RejectReason::InvalidQuorum { group, error } => {
                write!(f, "{}: group {group}: {error}", self.message())
            }
            RejectReason::MembershipUnavailable { group, error } => {
                write!(f, "{}: group {group}: {error}", self.message())
            }
        }
    }
}

/// Decide whether `job` may be considered for placement.
///
/// `snapshot` must describe the job's own group. A snapshot for any other
/// group contributes no members, so the job fails closed.
pub fn check_admission(job: &Job, snapshot: &GroupSnapshot) -> Admission {
    let Some(group) = job.group() else {
        return Admission::Admit;
    };

    let required = match job.quorum() {
        Ok(q) => q,
        Err(error) => {
            return Admission::Reject(RejectReason::InvalidQuorum {
                group: group.to_string(),
                error,
            });
        }
    };

    let present = if snapshot.group == group {
        snapshot.member_count
    } else {
        0
    };

    if present as u64 >= required {
        Admission::Admit
    } else {
        Admission::Reject(RejectReason::InsufficientMembership {
            group: group.to_string(),
            required,
            present,
        })
    }
}

/// Admission check bound to a membership source.
#[derive(Clone)]
pub struct AdmissionChecker {
    source: Arc<dyn GroupMembershipSource>,
}

impl AdmissionChecker {
    pub fn new(source: Arc<dyn GroupMembershipSource>) -> Self {
        Self { source }
    }

    /// Look up the job's group and apply [`check_admission`].
    ///
    /// Ungated jobs never touch the membership source.
    pub fn check(&self, job: &Job) -> Admission {
        let Some(group) = job.group() else {
            return Admission::Admit;
        };

        match self.source.group_snapshot(group) {
            Ok(snapshot) => check_admission(job, &snapshot),
            Err(error) => Admission::Reject(RejectReason::MembershipUnavailable {
                group: group.to_string(),
                error,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podgang_core::{GROUP_LABEL, LookupResult, MIN_AVAILABLE_LABEL};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedMembers(usize);

    impl GroupMembershipSource for FixedMembers {
        fn group_snapshot(&self, group: &str) -> LookupResult<GroupSnapshot> {
            Ok(GroupSnapshot::new(group, self.0))
        }
    }

    struct Unreachable;

    impl GroupMembershipSource for Unreachable {
        fn group_snapshot(&self, _group: &str) -> LookupResult<GroupSnapshot> {
            Err(LookupError::Unavailable("informer not synced".to_string()))
        }
    }

    #[derive(Default)]
    struct CountingSource(AtomicUsize);

    impl GroupMembershipSource for CountingSource {
        fn group_snapshot(&self, group: &str) -> LookupResult<GroupSnapshot> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(GroupSnapshot::new(group, 0))
        }
    }

    #[test]
    fn ungated_job_always_admitted() {
        let job = Job::new("solo");
        assert_eq!(check_admission(&job, &GroupSnapshot::new("g1", 0)), Admission::Admit);
        assert_eq!(check_admission(&job, &GroupSnapshot::new("", 0)), Admission::Admit);
    }

    #[test]
    fn quorum_boundary() {
        let snapshot = GroupSnapshot::new("g1", 3);
        for (quorum, admitted) in [(1, true), (3, true), (5, false)] {
            let job = Job::gang("p", "g1", quorum);
            assert_eq!(
                check_admission(&job, &snapshot).is_admitted(),
                admitted,
                "quorum {quorum} with 3 members"
            );
        }
    }

    #[test]
    fn zero_quorum_admits_empty_group() {
        let job = Job::gang("p", "g1", 0);
        assert!(check_admission(&job, &GroupSnapshot::new("g1", 0)).is_admitted());
    }

    #[test]
    fn insufficient_membership_reports_counts() {
        let job = Job::gang("p", "g1", 5);
        let decision = check_admission(&job, &GroupSnapshot::new("g1", 3));
        let Admission::Reject(reason) = decision else {
            panic!("expected rejection");
        };
        assert_eq!(
            reason,
            RejectReason::InsufficientMembership {
                group: "g1".to_string(),
                required: 5,
                present: 3,
            }
        );
        assert_eq!(reason.message(), "insufficient group membership");
    }

    #[test]
    fn malformed_quorum_fails_closed() {
        let job = Job::new("p")
            .with_label(GROUP_LABEL, "g1")
            .with_label(MIN_AVAILABLE_LABEL, "-1");
        let decision = check_admission(&job, &GroupSnapshot::new("g1", 100));
        let Admission::Reject(reason) = decision else {
            panic!("expected rejection");
        };
        assert_eq!(reason.message(), "invalid quorum specification");
        assert_eq!(reason.kind(), "invalid_quorum");
    }

    #[test]
    fn missing_quorum_fails_closed() {
        let job = Job::new("p").with_label(GROUP_LABEL, "g1");
        let decision = check_admission(&job, &GroupSnapshot::new("g1", 100));
        assert!(matches!(
            decision,
            Admission::Reject(RejectReason::InvalidQuorum { error: QuorumError::Missing, .. })
        ));
    }

    #[test]
    fn quorum_above_u32_is_a_count_not_an_error() {
        let job = Job::new("p")
            .with_label(GROUP_LABEL, "g1")
            .with_label(MIN_AVAILABLE_LABEL, "5000000000");
        let decision = check_admission(&job, &GroupSnapshot::new("g1", 3));
        assert_eq!(
            decision,
            Admission::Reject(RejectReason::InsufficientMembership {
                group: "g1".to_string(),
                required: 5_000_000_000,
                present: 3,
            })
        );
    }

    #[test]
    fn only_metadata_and_source_problems_are_faults() {
        let short = RejectReason::InsufficientMembership {
            group: "g1".to_string(),
            required: 5,
            present: 3,
        };
        let bad_quorum = RejectReason::InvalidQuorum {
            group: "g1".to_string(),
            error: QuorumError::Missing,
        };
        let unreachable = RejectReason::MembershipUnavailable {
            group: "g1".to_string(),
            error: LookupError::Unavailable("informer not synced".to_string()),
        };
        assert!(!short.is_fault());
        assert!(bad_quorum.is_fault());
        assert!(unreachable.is_fault());
    }

    #[test]
    fn snapshot_for_other_group_counts_nothing() {
        let job = Job::gang("p", "g1", 1);
        assert!(!check_admission(&job, &GroupSnapshot::new("g2", 10)).is_admitted());
    }

    #[test]
    fn check_is_idempotent() {
        let job = Job::gang("p", "g1", 3);
        let snapshot = GroupSnapshot::new("g1", 2);
        let first = check_admission(&job, &snapshot);
        let second = check_admission(&job, &snapshot);
        assert_eq!(first, second);
        assert_eq!(snapshot, GroupSnapshot::new("g1", 2));
    }

    #[test]
    fn checker_uses_source() {
        let checker = AdmissionChecker::new(Arc::new(FixedMembers(3)));
        assert!(checker.check(&Job::gang("p", "g1", 3)).is_admitted());
        assert!(!checker.check(&Job::gang("p", "g1", 4)).is_admitted());
    }

    #[test]
    fn checker_fails_closed_on_lookup_error() {
        let checker = AdmissionChecker::new(Arc::new(Unreachable));
        let decision = checker.check(&Job::gang("p", "g1", 0));
        assert!(matches!(
            decision,
            Admission::Reject(RejectReason::MembershipUnavailable { .. })
        ));
    }

    #[test]
    fn checker_skips_lookup_for_ungated_jobs() {
        let source = Arc::new(CountingSource::default());
        let checker = AdmissionChecker::new(source.clone());
        assert!(checker.check(&Job::new("solo")).is_admitted());
        assert_eq!(source.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn reason_display_includes_counts() {
        let reason = RejectReason::InsufficientMembership {
            group: "g1".to_string(),
            required: 5,
            present: 3,
        };
        assert_eq!(
            reason.to_string(),
            "insufficient group membership: group g1 has 3 of 5 members"
        );
    }
}
