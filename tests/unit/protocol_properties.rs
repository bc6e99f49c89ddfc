//! Property tests for limits, sequencing, and the characteristic codecs.

use ble_actuator::motor::{Direction, MotorStatus, Phase, StepSequencer};
use ble_actuator::protocol::{decode_command, encode_command, PositionEncoding, StatusFrame};
use ble_actuator::{Command, PositionLimiter, ProtocolError};
use proptest::prelude::*;

proptest! {
    #[test]
    fn clamp_stays_in_range(min in -20_000i32..0, span in 0i32..20_000, p in any::<i32>()) {
        let limiter = PositionLimiter::new(min, min + span);
        let clamped = limiter.clamp(p);

        prop_assert!(limiter.contains(clamped));
        if limiter.contains(p) {
            prop_assert_eq!(clamped, p);
        }
    }

    #[test]
    fn relative_clamp_never_overflows(current in -1000i32..1000, delta in any::<i32>()) {
        let limiter = PositionLimiter::new(-1000, 1000);
        prop_assert!(limiter.contains(limiter.clamp_relative(current, delta)));
    }

    #[test]
    fn phase_moves_by_one(start in 0u8..4, forward in any::<bool>()) {
        let direction = if forward { Direction::Forward } else { Direction::Backward };
        let phase = Phase::new(start);
        let next = phase.advance(direction);

        let diff = (i16::from(next.index()) - i16::from(phase.index())).rem_euclid(4);
        prop_assert_eq!(diff, if forward { 1 } else { 3 });

        let a = StepSequencer::pattern(phase).bits();
        let b = StepSequencer::pattern(next).bits();
        prop_assert_eq!((a ^ b).count_ones(), 2);
    }

    #[test]
    fn known_opcodes_decode(op in 0u8..=6, param in any::<i16>()) {
        let [lo, hi] = param.to_le_bytes();
        let command = decode_command(&[op, lo, hi]);
        prop_assert!(command.is_ok());
    }

    #[test]
    fn unknown_opcodes_reject(op in 7u8..=255, lo in any::<u8>(), hi in any::<u8>()) {
        prop_assert_eq!(decode_command(&[op, lo, hi]), Err(ProtocolError::UnknownOpcode(op)));
    }

    #[test]
    fn wrong_length_rejects(bytes in prop::collection::vec(any::<u8>(), 0..8)) {
        prop_assume!(bytes.len() != 3);
        let rejected = matches!(
            decode_command(&bytes),
            Err(ProtocolError::InvalidLength { expected: 3, .. })
        );
        prop_assert!(rejected);
    }

    #[test]
    fn moves_survive_the_wire(target in any::<i16>()) {
        let command = Command::MoveAbsolute(i32::from(target));
        prop_assert_eq!(decode_command(&encode_command(command)), Ok(command));
    }

    #[test]
    fn percent_steps_stay_close(pct in 0i16..=100) {
        let limits = PositionLimiter::new(0, 2000);
        let steps = PositionEncoding::Percent.to_steps(pct, limits);

        prop_assert_eq!(steps, i32::from(pct) * 20);
        prop_assert_eq!(PositionEncoding::Percent.from_steps(steps, limits), pct);
    }

    #[test]
    fn status_frame_survives_the_wire(
        status in prop_oneof![
            Just(MotorStatus::Idle),
            Just(MotorStatus::Moving),
            Just(MotorStatus::Error),
            Just(MotorStatus::Disabled),
        ],
        position in any::<i16>(),
        fault in any::<bool>(),
    ) {
        let frame = StatusFrame { status, position, fault };
        prop_assert_eq!(StatusFrame::decode(&frame.encode()), Ok(frame));
    }
}
