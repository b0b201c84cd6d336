//! Behavioral tests of the movement model over many ticks.
//!
//! Each test drives the pure transition function through a scenario and
//! checks the velocities it actually produces, including the hand-computed
//! reference numbers for the shipped player tuning.

use approx::assert_relative_eq;
use bevy::prelude::*;
use force_platformer_controller::prelude::*;
use rstest::rstest;

const DT: f32 = 1.0 / 60.0;

fn input(direction_x: f32, on_floor: bool) -> TickInput {
    TickInput {
        direction: Vec2::new(direction_x, 0.0),
        jump_pressed: false,
        jump_just_pressed: false,
        on_floor,
        dt: DT,
    }
}

fn jump_input(on_floor: bool) -> TickInput {
    TickInput {
        jump_pressed: true,
        jump_just_pressed: true,
        ..input(0.0, on_floor)
    }
}

// Player tuning: mass 84, gravity -980, drag 0.0043, friction 2.0,
// drive acceleration 1000, cap 300, jump 300, noise threshold 10.
fn player() -> MovementConfig {
    MovementConfig::player()
}

#[test]
fn rest_invariant() {
    // Grounded, no input, sub-threshold residue: exactly (0, 0) after one tick.
    let config = player();
    let residue = Vec2::new(config.noise_threshold * 0.99, 0.0);
    assert_eq!(step(&config, residue, &input(0.0, true)), Vec2::ZERO);
}

#[test]
fn coasting_friction_never_reverses_the_velocity() {
    let config = player();
    let mut velocity = Vec2::new(400.0, 0.0);
    let mut previous_speed = velocity.x;

    for _ in 0..600 {
        velocity = step(&config, velocity, &input(0.0, true));
        assert!(
            velocity.x >= 0.0,
            "friction must never flip the sign, got {}",
            velocity.x
        );
        assert!(
            velocity.x <= previous_speed,
            "speed must be non-increasing while coasting"
        );
        previous_speed = velocity.x;
    }

    assert_eq!(velocity.x, 0.0, "coasting must reach exact rest");

    // And stay there
    velocity = step(&config, velocity, &input(0.0, true));
    assert_eq!(velocity, Vec2::ZERO);
}

#[test]
fn damping_caps_the_top_speed() {
    let config = player();
    let cap = config.target_max_speed;
    let per_tick_gain = config.drive_force() / config.mass * DT;

    let mut velocity = Vec2::ZERO;
    let mut peak: f32 = 0.0;
    for tick in 0..600 {
        velocity = step(&config, velocity, &input(1.0, true));
        if tick <= 60 {
            peak = peak.max(velocity.x);
        } else {
            // Long past the ramp-up: the speed must not creep further
            assert!(
                velocity.x <= peak,
                "speed must not grow tick-over-tick once capped"
            );
        }
    }

    assert!(velocity.x > cap * 0.99, "drive should reach the cap");
    assert!(
        peak <= cap + per_tick_gain,
        "overshoot is bounded by a single tick of drive, peak {peak}"
    );
}

#[rstest]
#[case(0.0)]
#[case(-123.0)]
#[case(250.0)]
fn jump_sets_the_exact_jump_velocity(#[case] prior_vertical: f32) {
    let config = player();
    let next = step(&config, Vec2::new(0.0, prior_vertical), &jump_input(true));
    assert_eq!(next.y, config.jump_velocity);
}

#[test]
fn airborne_horizontal_drag_decays_without_reversing() {
    let config = player();
    let mut velocity = Vec2::new(200.0, 0.0);
    let mut previous_speed = velocity.x;

    for _ in 0..60 {
        velocity = step(&config, velocity, &input(0.0, false));
        assert!(velocity.x > 0.0, "quadratic drag only approaches zero");
        assert!(velocity.x < previous_speed);
        previous_speed = velocity.x;
    }
}

#[test]
fn braking_input_passes_through_zero_without_oscillating() {
    let config = player();
    let mut velocity = Vec2::new(300.0, 0.0);
    let mut reversed = false;

    for _ in 0..600 {
        let next = step(&config, velocity, &input(-1.0, true));
        if reversed {
            assert!(
                next.x <= velocity.x || next.x <= -config.target_max_speed,
                "after reversing, speed keeps building leftwards until the cap"
            );
        }
        if next.x < 0.0 {
            reversed = true;
        }
        velocity = next;
    }

    assert!(reversed, "opposing input should eventually reverse motion");
    assert!(velocity.x < 0.0);
}

#[test]
fn jump_then_fall_matches_hand_computed_values() {
    // The reference scenario for the player tuning: at rest on the floor,
    // jump pressed, then one airborne tick with no input.
    let config = player();

    let launched = step(&config, Vec2::ZERO, &jump_input(true));
    assert_eq!(launched, Vec2::new(0.0, 300.0));

    // Vertical force next tick: drag(300) + 84 * (-980)
    //   = -0.0043 * 300² - 82320 = -82707
    // so velocity.y = 300 - 82707 / 84 * (1/60) = 283.58988
    let falling = step(&config, launched, &input(0.0, false));
    assert_eq!(falling.x, 0.0);
    assert_relative_eq!(falling.y, 283.58988, epsilon = 1e-3);
}

#[test]
fn full_hop_returns_to_rest() {
    // Jump, rise, fall; once the host reports floor contact again the
    // velocity settles back to exact zero.
    let config = player();
    let mut velocity = step(&config, Vec2::ZERO, &jump_input(true));

    // Airborne until the (scripted) landing
    for _ in 0..120 {
        velocity = step(&config, velocity, &input(0.0, false));
        assert!(velocity.y.is_finite() && velocity.x.is_finite());
    }
    assert!(velocity.y < 0.0, "gravity should have turned the hop around");

    // The host resolves the landing: floor contact, impact absorbed
    velocity.y = 0.0;
    velocity = step(&config, velocity, &input(0.0, true));
    assert_eq!(velocity, Vec2::ZERO);
}
