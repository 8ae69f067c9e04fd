//! Membership Module Tests
//!
//! ## Test Scopes
//! - **Identity & Roles**: Only worker 0 carries the coordinator capability.
//! - **Ring Topology**: Neighbor formulas including wraparound and the single-member ring.
//! - **Roster**: Forward-only lifecycle transitions and state summaries.

#[cfg(test)]
mod tests {
    use crate::membership::service::Roster;
    use crate::membership::types::{Role, RingTopology, WorkerId, WorkerState};

    // ============================================================
    // ROLE TESTS
    // ============================================================

    #[test]
    fn test_only_worker_zero_coordinates() {
        assert_eq!(WorkerId(0).role(), Role::Coordinator);
        assert!(WorkerId(0).role().is_coordinator());

        for i in 1..10 {
            assert_eq!(WorkerId(i).role(), Role::Worker);
        }
    }

    // ============================================================
    // RING TOPOLOGY TESTS
    // ============================================================

    #[test]
    fn test_ring_wraparound() {
        let ring = RingTopology::new(4);

        assert_eq!(ring.left_of(WorkerId(0)), WorkerId(3));
        assert_eq!(ring.right_of(WorkerId(0)), WorkerId(1));
        assert_eq!(ring.left_of(WorkerId(3)), WorkerId(2));
        assert_eq!(ring.right_of(WorkerId(3)), WorkerId(0));
    }

    #[test]
    fn test_ring_neighbors_are_inverse() {
        let ring = RingTopology::new(100);

        for worker in ring.members() {
            assert_eq!(ring.left_of(ring.right_of(worker)), worker);
            assert_eq!(ring.right_of(ring.left_of(worker)), worker);
        }
    }

    #[test]
    fn test_single_member_ring_is_own_neighbor() {
        let ring = RingTopology::new(1);

        assert_eq!(ring.left_of(WorkerId(0)), WorkerId(0));
        assert_eq!(ring.right_of(WorkerId(0)), WorkerId(0));
    }

    #[test]
    fn test_two_member_ring() {
        let ring = RingTopology::new(2);

        assert_eq!(ring.left_of(WorkerId(0)), WorkerId(1));
        assert_eq!(ring.right_of(WorkerId(0)), WorkerId(1));
    }

    // ============================================================
    // ROSTER TESTS
    // ============================================================

    #[test]
    fn test_roster_forward_transitions() {
        let roster = Roster::new(RingTopology::new(2));
        roster.join(WorkerId(0));

        assert!(roster.advance(WorkerId(0), WorkerState::SegmentReceived { nuts: 5 }));
        assert!(roster.advance(WorkerId(0), WorkerState::Published));

        // Backward move is ignored
        assert!(!roster.advance(WorkerId(0), WorkerState::Joined));
        assert_eq!(roster.state(WorkerId(0)), Some(WorkerState::Published));
    }

    #[test]
    fn test_roster_unknown_worker() {
        let roster = Roster::new(RingTopology::new(2));

        assert!(!roster.advance(WorkerId(1), WorkerState::Published));
        assert_eq!(roster.state(WorkerId(1)), None);
    }

    #[test]
    fn test_roster_failed_is_terminal() {
        let roster = Roster::new(RingTopology::new(1));
        roster.join(WorkerId(0));
        roster.mark_failed(WorkerId(0), "boom");

        assert!(!roster.advance(WorkerId(0), WorkerState::Reported));
        assert_eq!(roster.state_counts(), (0, 0, 0, 0, 1));
    }

    #[test]
    fn test_roster_state_counts_summarize_run() {
        // ARRANGE: Four squirrels at different stages
        let roster = Roster::new(RingTopology::new(4));
        for i in 0..4 {
            roster.join(WorkerId(i));
        }

        // ACT
        roster.advance(WorkerId(1), WorkerState::SegmentReceived { nuts: 3 });
        roster.advance(WorkerId(2), WorkerState::Published);
        roster.mark_failed(WorkerId(3), "lost");

        // ASSERT: Failure keeps its reason, counts cover every stage
        assert_eq!(
            roster.state(WorkerId(3)),
            Some(WorkerState::Failed {
                reason: "lost".to_string()
            })
        );
        assert_eq!(roster.state_counts(), (1, 1, 1, 0, 1));
    }
}
