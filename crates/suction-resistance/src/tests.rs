#[cfg(test)]
mod tests {
    use glam::DVec3;

    use suction_core::components::{Resistance, StruggleState};
    use suction_core::types::Shape;

    use crate::fsm::{evaluate, StruggleContext, StrugglePhase};
    use crate::ground::{ground_probes, is_grounded};

    fn resistance(capacity: f64) -> Resistance {
        Resistance {
            capacity,
            regeneration_per_sec: 1.0,
            multiplier: 1.0,
            requires_ground: false,
            capture_on_liftoff: true,
            adherence_force: 0.0,
        }
    }

    fn make_context(resistance: Resistance, progress: f64, distance: f64) -> StruggleContext {
        StruggleContext {
            state: StruggleState {
                progress,
                active: progress > 0.0,
            },
            resistance,
            distance,
            activation_distance: 0.8,
            closeness: 1.0,
            gain_per_sec: 1.0,
            suction_multiplier: 1.0,
            grounded: None,
            dt: 1.0,
        }
    }

    #[test]
    fn test_no_resistance_is_always_ready() {
        let update = evaluate(&make_context(resistance(0.0), 0.0, 0.1));
        assert!(update.capture_ready);
        assert_eq!(update.phase, StrugglePhase::Idle);
        assert_eq!(update.state, StruggleState::default());
    }

    #[test]
    fn test_progress_accumulates_until_capacity() {
        let mut ctx = make_context(resistance(3.0), 0.0, 0.2);
        for expected in [1.0, 2.0] {
            let update = evaluate(&ctx);
            assert_eq!(update.phase, StrugglePhase::Struggling);
            assert!((update.state.progress - expected).abs() < 1e-9);
            assert!(!update.capture_ready, "Not ready at progress {expected}");
            ctx.state = update.state;
        }
        let update = evaluate(&ctx);
        assert!((update.state.progress - 3.0).abs() < 1e-9);
        assert!(update.capture_ready);
    }

    #[test]
    fn test_progress_never_exceeds_capacity() {
        let mut ctx = make_context(resistance(2.0), 1.9, 0.2);
        ctx.gain_per_sec = 50.0;
        let update = evaluate(&ctx);
        assert_eq!(update.state.progress, 2.0);

        // Out-of-range input gets clamped too
        let ctx = make_context(resistance(2.0), 7.0, 5.0);
        let update = evaluate(&ctx);
        assert!(update.state.progress <= 2.0 && update.state.progress >= 0.0);
    }

    #[test]
    fn test_gain_scales_with_multipliers() {
        let mut r = resistance(10.0);
        r.multiplier = 2.0;
        let mut ctx = make_context(r, 0.0, 0.2);
        ctx.suction_multiplier = 3.0;
        ctx.closeness = 0.5;
        ctx.dt = 0.02;
        let update = evaluate(&ctx);
        // 1 × 0.5 × 3 / 2 × 0.02
        assert!((update.state.progress - 0.015).abs() < 1e-12);
    }

    #[test]
    fn test_decay_outside_activation_distance_clears_active() {
        let ctx = make_context(resistance(3.0), 1.5, 2.0);
        let update = evaluate(&ctx);
        assert_eq!(update.phase, StrugglePhase::Recovering);
        assert!((update.state.progress - 0.5).abs() < 1e-9);
        assert!(update.state.active);

        let ctx = StruggleContext {
            state: update.state,
            ..ctx
        };
        let update = evaluate(&ctx);
        assert_eq!(update.state.progress, 0.0);
        assert!(!update.state.active, "Struggle clears once progress hits zero");
    }

    #[test]
    fn test_adherence_fades_with_progress() {
        let mut r = resistance(4.0);
        r.adherence_force = 10.0;
        let update = evaluate(&make_context(r, 0.0, 0.2));
        // progress 1 of 4 → 75% of the force remains
        assert!((update.adherence - 7.5).abs() < 1e-9);

        let update = evaluate(&make_context(r, 4.0, 0.2));
        assert_eq!(update.adherence, 0.0);

        let update = evaluate(&make_context(r, 0.0, 5.0));
        assert_eq!(update.adherence, 0.0, "No adherence before struggling starts");
    }

    #[test]
    fn test_liftoff_waives_gate_and_decays() {
        let mut r = resistance(3.0);
        r.requires_ground = true;
        let mut ctx = make_context(r, 2.0, 0.2);
        ctx.grounded = Some(false);
        let update = evaluate(&ctx);
        assert_eq!(update.phase, StrugglePhase::LiftedOff);
        assert!(update.capture_ready);
        assert!((update.state.progress - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_liftoff_without_permission_holds() {
        let mut r = resistance(3.0);
        r.requires_ground = true;
        r.capture_on_liftoff = false;
        let mut ctx = make_context(r, 2.0, 0.2);
        ctx.grounded = Some(false);
        let update = evaluate(&ctx);
        assert_eq!(update.phase, StrugglePhase::Held);
        assert!(!update.capture_ready);
        assert_eq!(update.state.progress, 2.0);

        ctx.grounded = Some(true);
        let update = evaluate(&ctx);
        assert_eq!(update.phase, StrugglePhase::Struggling);
        assert!(update.capture_ready);
    }

    #[test]
    fn test_ground_probe_layout() {
        let shape = Shape::Cuboid {
            half_extents: DVec3::new(0.5, 0.25, 0.5),
        };
        let probes = ground_probes(&shape, DVec3::new(0.0, 1.0, 0.0), 0.15, 0.02);
        assert_eq!(probes[0].origin, DVec3::new(0.0, 1.0, 0.0));
        assert!((probes[0].max_distance - 0.4).abs() < 1e-12);
        for probe in &probes[1..] {
            assert!((probe.origin.y - 0.77).abs() < 1e-12);
            assert_eq!(probe.origin.x.abs(), 0.5);
            assert_eq!(probe.origin.z.abs(), 0.5);
        }
    }

    #[test]
    fn test_any_probe_hit_counts_as_grounded() {
        let shape = Shape::Sphere { radius: 0.2 };
        let probes = ground_probes(&shape, DVec3::ZERO, 0.1, 0.02);
        let mut calls = 0;
        let grounded = is_grounded(&probes, |origin, _| {
            calls += 1;
            origin.x > 0.0 && origin.z > 0.0
        });
        assert!(grounded);
        assert_eq!(calls, 5, "Only the last corner hits");
        assert!(!is_grounded(&probes, |_, _| false));
    }
}
