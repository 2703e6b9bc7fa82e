use std::collections::{HashMap, HashSet};

use line_counter::{
    AssignmentStrategy, CountingLine, CountingSession, CrossingDirection, Detection,
    DirectionFilter, FrameReport, SessionConfig, TrackerConfig,
};

fn vehicle(cx: f32, cy: f32) -> Detection {
    Detection::from_xywh(cx, cy, 40.0, 40.0)
}

fn session(max_match_distance: f32, max_disappeared: u32) -> CountingSession {
    CountingSession::new(SessionConfig {
        tracker: TrackerConfig {
            max_match_distance,
            max_disappeared,
            ..TrackerConfig::default()
        },
        counting_line: CountingLine::Horizontal { y: 300.0 },
        ..SessionConfig::default()
    })
    .unwrap()
}

#[test]
fn test_single_vehicle_crosses_once() {
    let mut session = session(80.0, 30);
    let reports: Vec<FrameReport> = [250.0, 280.0, 310.0, 340.0]
        .into_iter()
        .map(|y| session.process_frame(&[vehicle(100.0, y)]))
        .collect();

    let fired: Vec<u64> = reports
        .iter()
        .filter(|r| !r.crossings.is_empty())
        .map(|r| r.frame_id)
        .collect();
    // Fires on the 280 -> 310 step, which is frame 3.
    assert_eq!(fired, vec![3]);

    let event = reports[2].crossings[0];
    assert_eq!(event.track_id, 0);
    assert_eq!(event.direction, CrossingDirection::Positive);
    assert_eq!(event.position.y, 310.0);
    assert_eq!(session.count(), 1);
    assert!(session.track(0).unwrap().counted);
}

#[test]
fn test_vehicle_stopping_short_is_not_counted() {
    let mut session = session(80.0, 30);
    for y in [250.0, 280.0, 295.0, 295.0, 280.0, 250.0] {
        session.process_frame(&[vehicle(100.0, y)]);
    }
    assert_eq!(session.count(), 0);
    assert!(!session.track(0).unwrap().counted);
}

#[test]
fn test_near_detection_matches_far_one_spawns() {
    let mut session = session(50.0, 10);
    session.process_frame(&[vehicle(100.0, 100.0)]);

    let report = session.process_frame(&[vehicle(103.0, 104.0), vehicle(100.0, 500.0)]);
    assert_eq!(report.matched, vec![(0, 0)]);
    assert_eq!(report.spawned, vec![1]);
    assert_eq!(session.track(0).unwrap().position().y, 104.0);
    assert_eq!(session.track(1).unwrap().position().y, 500.0);
}

#[test]
fn test_track_retired_after_max_disappeared_gets_new_id() {
    let mut session = session(50.0, 10);
    session.process_frame(&[vehicle(100.0, 100.0)]);

    let mut retired = Vec::new();
    for _ in 0..11 {
        retired.extend(session.process_frame(&[]).retired);
    }
    assert_eq!(retired, vec![0]);
    assert_eq!(session.live_tracks().count(), 0);

    let report = session.process_frame(&[vehicle(100.0, 100.0)]);
    assert_eq!(report.spawned, vec![1]);
    assert!(report.matched.is_empty());
}

#[test]
fn test_track_survives_exactly_max_disappeared_misses() {
    let mut session = session(50.0, 10);
    session.process_frame(&[vehicle(100.0, 100.0)]);
    for _ in 0..10 {
        assert!(session.process_frame(&[]).retired.is_empty());
    }

    let report = session.process_frame(&[vehicle(100.0, 100.0)]);
    assert_eq!(report.matched, vec![(0, 0)]);
    assert_eq!(session.track(0).unwrap().disappeared_count, 0);
}

#[test]
fn test_oscillation_counts_once() {
    let mut session = session(80.0, 30);
    let mut events = 0;
    for y in [280.0, 310.0, 290.0, 310.0, 290.0, 320.0, 280.0] {
        events += session.process_frame(&[vehicle(100.0, y)]).crossings.len();
    }
    assert_eq!(events, 1);
    assert_eq!(session.count(), 1);
}

#[test]
fn test_crossing_across_a_miss() {
    // The vehicle is occluded for two frames right at the line; the history
    // only holds matched positions, so the crossing still registers.
    let mut session = session(80.0, 30);
    session.process_frame(&[vehicle(100.0, 270.0)]);
    session.process_frame(&[vehicle(100.0, 290.0)]);
    session.process_frame(&[]);
    session.process_frame(&[]);
    let report = session.process_frame(&[vehicle(100.0, 340.0)]);

    assert_eq!(report.crossings.len(), 1);
    assert_eq!(report.crossings[0].frame_id, 5);
}

#[test]
fn test_long_stop_on_line_still_counts() {
    // Parked on the line for longer than the 30-point history holds.
    let mut session = session(80.0, 30);
    session.process_frame(&[vehicle(100.0, 280.0)]);
    for _ in 0..40 {
        let report = session.process_frame(&[vehicle(100.0, 300.0)]);
        assert!(report.crossings.is_empty());
    }
    let track = session.track(0).unwrap();
    assert!(track.position_history.iter().all(|p| p.y == 300.0));

    let report = session.process_frame(&[vehicle(100.0, 320.0)]);
    assert_eq!(report.crossings.len(), 1);
    assert_eq!(report.crossings[0].direction, CrossingDirection::Positive);
    assert_eq!(report.crossings[0].frame_id, 42);
    assert_eq!(session.count(), 1);
}

fn optimal_session(max_match_distance: f32) -> CountingSession {
    CountingSession::new(SessionConfig {
        tracker: TrackerConfig {
            max_match_distance,
            assignment: AssignmentStrategy::Optimal,
            ..TrackerConfig::default()
        },
        ..SessionConfig::default()
    })
    .unwrap()
}

#[test]
fn test_optimal_strategy_minimises_total_distance() {
    let frames = [
        vec![vehicle(100.0, 100.0), vehicle(130.0, 100.0)],
        vec![vehicle(110.0, 100.0), vehicle(80.0, 100.0)],
    ];

    // Greedy takes the 10 px pair first and leaves track 1 a 50 px jump.
    let mut greedy = session(80.0, 30);
    let greedy_report = frames.iter().map(|f| greedy.process_frame(f)).last().unwrap();
    assert_eq!(greedy_report.matched, vec![(0, 0), (1, 1)]);

    // Optimal pays 20 + 20 instead of 10 + 50.
    let mut optimal = optimal_session(80.0);
    let report = frames.iter().map(|f| optimal.process_frame(f)).last().unwrap();
    assert_eq!(report.matched, vec![(0, 1), (1, 0)]);
    assert!(report.spawned.is_empty());
    assert_eq!(optimal.track(0).unwrap().position().x, 80.0);
    assert_eq!(optimal.track(1).unwrap().position().x, 110.0);
}

#[test]
fn test_optimal_strategy_equidistant_tracks_pair_in_id_order() {
    let mut session = optimal_session(80.0);
    session.process_frame(&[vehicle(100.0, 100.0), vehicle(100.0, 200.0)]);

    // Both centroids sit 50 px from both tracks; the third is out of reach.
    let report = session.process_frame(&[
        vehicle(100.0, 150.0),
        vehicle(100.0, 150.0),
        vehicle(700.0, 500.0),
    ]);
    assert_eq!(report.matched, vec![(0, 0), (1, 1)]);
    assert_eq!(report.spawned, vec![2]);
    assert_eq!(session.live_tracks().count(), 3);
}

#[test]
fn test_direction_filter_counts_incoming_only() {
    let mut session = CountingSession::new(SessionConfig {
        count_direction: DirectionFilter::Positive,
        ..SessionConfig::default()
    })
    .unwrap();

    // Vehicle 0 drives down (incoming), vehicle 1 drives up.
    for step in 0..4 {
        let d = step as f32 * 30.0;
        session.process_frame(&[vehicle(100.0, 250.0 + d), vehicle(600.0, 350.0 - d)]);
    }

    assert_eq!(session.count(), 1);
    assert_eq!(session.counter().positive(), 1);
    assert_eq!(session.counter().negative(), 0);
    assert!(session.track(0).unwrap().counted);
    assert!(!session.track(1).unwrap().counted);
}

#[test]
fn test_sessions_are_independent() {
    let mut a = session(80.0, 30);
    let mut b = session(80.0, 30);
    for y in [280.0, 310.0] {
        a.process_frame(&[vehicle(100.0, y)]);
    }
    b.process_frame(&[vehicle(100.0, 280.0)]);

    assert_eq!(a.count(), 1);
    assert_eq!(b.count(), 0);
    assert_eq!(b.live_tracks().next().unwrap().id, 0);
}

/// Deterministic traffic: vehicles entering from the top at staggered
/// frames, driving down at different speeds, with periodic dropouts.
fn traffic() -> Vec<Vec<Detection>> {
    let lanes = [(120.0, 9.0, 0), (300.0, 14.0, 5), (480.0, 11.0, 12), (660.0, 17.0, 20)];
    let mut seed: u32 = 12345;
    let mut frames = Vec::new();
    for frame in 0..80u32 {
        let mut dets = Vec::new();
        for &(x, speed, start) in &lanes {
            if frame < start {
                continue;
            }
            let y = 40.0 + (frame - start) as f32 * speed;
            if y > 580.0 {
                continue;
            }
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if (seed >> 16) % 7 == 0 {
                continue;
            }
            let jitter = ((seed >> 8) % 5) as f32 - 2.0;
            dets.push(vehicle(x + jitter, y));
        }
        frames.push(dets);
    }
    frames
}

fn run(frames: &[Vec<Detection>]) -> (Vec<FrameReport>, Vec<Vec<u64>>) {
    let mut session = session(60.0, 5);
    let mut reports = Vec::new();
    let mut ids = Vec::new();
    for dets in frames {
        reports.push(session.process_frame(dets));
        ids.push(session.live_tracks().map(|t| t.id).collect());
    }
    (reports, ids)
}

#[test]
fn test_traffic_properties() {
    let frames = traffic();
    let (reports, ids) = run(&frames);

    let mut last_count = 0;
    let mut per_track: HashMap<u64, usize> = HashMap::new();
    for (report, live) in reports.iter().zip(&ids) {
        let unique: HashSet<&u64> = live.iter().collect();
        assert_eq!(unique.len(), live.len(), "duplicate live id");

        assert!(report.count >= last_count, "counter went backwards");
        last_count = report.count;

        for event in &report.crossings {
            *per_track.entry(event.track_id).or_default() += 1;
        }
    }

    assert!(per_track.values().all(|&n| n == 1));
    assert_eq!(last_count as usize, per_track.len());
    // Every lane's vehicle reaches y = 300 within the run.
    assert_eq!(last_count, 4);
}

#[test]
fn test_runs_are_deterministic() {
    let frames = traffic();
    let first = run(&frames);
    let second = run(&frames);
    assert_eq!(first, second);
}
