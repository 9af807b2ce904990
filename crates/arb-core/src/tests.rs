//! Unit tests for arb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentHandle, GoalId};

    #[test]
    fn handle_bits_roundtrip() {
        let h = AgentHandle::new(7, 3);
        assert_eq!(h.to_bits(), (3u64 << 32) | 7);
        assert_eq!(AgentHandle::from_bits(h.to_bits()), h);
    }

    #[test]
    fn generations_distinguish_slot_occupants() {
        let first = AgentHandle::new(4, 0);
        let second = AgentHandle::new(4, 1);
        assert_eq!(first.slot(), second.slot());
        assert_ne!(first, second);
        assert_ne!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(GoalId::INVALID.0, u16::MAX);
        assert_eq!(GoalId::default(), GoalId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(GoalId(2).to_string(), "GoalId(2)");
        assert_eq!(AgentHandle::new(1, 2).to_string(), "Agent(1v2)");
    }
}

#[cfg(test)]
mod catalog {
    use crate::{Behavior, InterruptKind, Priority};

    #[test]
    fn priority_ordering() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Low > Priority::Background);
    }

    #[test]
    fn priority_from_weight_rounds_down() {
        assert_eq!(Priority::from_weight(3.9), Priority::High);
        assert_eq!(Priority::from_weight(2.0), Priority::Medium);
        assert_eq!(Priority::from_weight(0.5), Priority::Background);
        assert_eq!(Priority::from_weight(-4.0), Priority::Background);
        assert_eq!(Priority::from_weight(f32::NAN), Priority::Background);
        assert_eq!(Priority::from_weight(40.0), Priority::Critical);
    }

    #[test]
    fn parse_names() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" attack ".parse::<Behavior>().unwrap(), Behavior::Attack);
        assert_eq!(
            "under_attack".parse::<InterruptKind>().unwrap(),
            InterruptKind::UnderAttack
        );
        assert!("sideways".parse::<Behavior>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for kind in InterruptKind::ALL {
            assert_eq!(kind.to_string().parse::<InterruptKind>().unwrap(), kind);
        }
    }

    #[test]
    fn idle_is_lowest_behavior() {
        assert!(Behavior::ALL.iter().all(|&b| b >= Behavior::Idle));
        assert!(Behavior::Idle.is_idle());
        assert!(!Behavior::Attack.is_idle());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimMode, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn since_saturates() {
        assert_eq!(Tick(3).since(Tick(10)), 0);
        assert_eq!(Tick(u64::MAX).offset(5), Tick(u64::MAX));
    }

    #[test]
    fn clock_advance_and_seek() {
        let mut clock = SimClock::new(Tick(0));
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert!(clock.mode.is_authoritative());

        clock.seek(Tick(1), SimMode::Replaying);
        assert_eq!(clock.current_tick, Tick(1));
        assert!(!clock.mode.is_authoritative());
        assert!(!SimMode::FastForward.is_authoritative());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentHandle, DecisionRng, Tick};

    #[test]
    fn same_coordinate_same_draws() {
        let agent = AgentHandle::new(3, 0);
        let mut r1 = DecisionRng::new(42, agent, Tick(9), 2);
        let mut r2 = DecisionRng::new(42, agent, Tick(9), 2);
        for _ in 0..50 {
            assert_eq!(r1.jitter(1.0), r2.jitter(1.0));
        }
    }

    #[test]
    fn different_streams_differ() {
        let agent = AgentHandle::new(3, 0);
        let a = DecisionRng::new(42, agent, Tick(9), 0).jitter(1.0);
        let b = DecisionRng::new(42, agent, Tick(9), 1).jitter(1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn seed_is_xor_of_coordinates() {
        let agent = AgentHandle::new(5, 0);
        assert_eq!(DecisionRng::seed_for(0, agent, Tick(3), 1), 5 ^ 3 ^ 1);
    }

    #[test]
    fn jitter_bounds() {
        let agent = AgentHandle::new(0, 0);
        for tick in 0..500 {
            let j = DecisionRng::new(1, agent, Tick(tick), 0).jitter(0.25);
            assert!((-0.25..0.25).contains(&j), "got {j}");
        }
        assert_eq!(DecisionRng::new(1, agent, Tick(0), 0).jitter(0.0), 0.0);
    }
}

#[cfg(test)]
mod position {
    use crate::Position;

    #[test]
    fn display_rounds_to_two_places() {
        assert_eq!(Position::new(3.0, -4.126).to_string(), "(3.00, -4.13)");
        assert_eq!(Position::default(), Position::ORIGIN);
    }
}
