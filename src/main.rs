//! Fantasy Contest Engine Simulation.
//!
//! Demonstrates the full contest lifecycle including card setup, odds
//! pricing, budget-validated entries, dead-heat results, and standings.

use stable_core::*;

fn main() {
    println!("Fantasy Contest Core Engine Simulation");
    println!("Single Tournament, Budget Rosters, Full Lifecycle\n");

    scenario_1_card_setup_and_pricing();
    scenario_2_entry_validation();
    scenario_3_lock_semantics();
    scenario_4_results_and_dead_heats();
    scenario_5_standings();
    scenario_6_roster_mode();

    println!("\nAll simulations completed successfully.");
}

/// Build a two-race card and price the field from morning lines.
fn scenario_1_card_setup_and_pricing() {
    println!("Scenario 1: Card Setup and Pricing\n");

    let mut engine = Engine::new(EngineConfig::default());
    engine.set_time(Timestamp::now());
    let tournament_id = engine
        .create_tournament("Keeneland Challenge", ContestConfig::default())
        .unwrap();

    let race = engine
        .add_race(tournament_id, 1, "Maiden Special Weight", "Keeneland", Timestamp::from_millis(0))
        .unwrap();

    let field = [
        ("Thunder Bolt", "J. Rosario", "T. Pletcher", "5-2"),
        ("Lightning Strike", "J. Velazquez", "S. McGaughey III", "4"),
        ("Storm Chaser", "L. Saez", "B. Cox", "8"),
        ("Wind Runner", "F. Geroux", "K. McPeek", "15"),
    ];

    for (i, &(name, jockey, trainer, line)) in field.iter().enumerate() {
        let odds = parse_odds(line).unwrap();
        engine
            .add_horse(
                tournament_id,
                race,
                StableNumber::new(i as u32 + 1).unwrap(),
                name,
                jockey,
                trainer,
                odds,
            )
            .unwrap();
    }

    let priced = engine.assign_prices(tournament_id).unwrap();
    println!("  Priced {} horses from the morning line:", priced);

    let tournament = engine.get_tournament(tournament_id).unwrap();
    for horse in &tournament.race(race).unwrap().horses {
        println!(
            "    {} {} ({}) costs {}",
            horse.number,
            horse.name,
            horse.odds,
            horse.cost.unwrap()
        );
    }
    println!();
}

/// Budget validation: acceptance, boundary, and rejection with overage.
fn scenario_2_entry_validation() {
    println!("Scenario 2: Entry Validation\n");

    let mut engine = Engine::new(EngineConfig::default());
    let (tournament_id, races) = build_two_race_card(&mut engine);

    let tournament = engine.get_tournament(tournament_id).unwrap();
    let cheap: Vec<HorseId> = races
        .iter()
        .map(|&r| tournament.race(r).unwrap().horses.last().unwrap().id)
        .collect();
    let favorites: Vec<HorseId> = races
        .iter()
        .map(|&r| tournament.race(r).unwrap().horses.first().unwrap().id)
        .collect();

    let longshot_picks = Picks::empty_per_race()
        .with_pick(races[0], cheap[0])
        .with_pick(races[1], cheap[1]);

    // the selection screen previews spend before committing anything
    let preview = engine.validate_picks(tournament_id, &longshot_picks).unwrap();
    println!("  Preview: spend {} against the budget", preview.spend);

    let receipt = engine
        .submit_entry(tournament_id, OwnerId(1), "Longshot Stable", longshot_picks)
        .unwrap();
    println!(
        "  Longshot stable accepted: spend {}, complete: {}",
        receipt.spend, receipt.complete
    );

    let chalk_picks = Picks::empty_per_race()
        .with_pick(races[0], favorites[0])
        .with_pick(races[1], favorites[1]);

    match engine.submit_entry(tournament_id, OwnerId(2), "Chalk Stable", chalk_picks) {
        Err(EngineError::Roster(RosterError::BudgetExceeded { spend, budget, overage })) => {
            println!("  Chalk stable rejected: spend {} over budget {} by {}", spend, budget, overage);
        }
        other => println!("  Unexpected outcome: {:?}", other),
    }
    println!();
}

/// Entries freeze at lock; the transition is one-way.
fn scenario_3_lock_semantics() {
    println!("Scenario 3: Lock Semantics\n");

    let mut engine = Engine::new(EngineConfig::default());
    let (tournament_id, races) = build_two_race_card(&mut engine);

    let tournament = engine.get_tournament(tournament_id).unwrap();
    let pick = tournament.race(races[0]).unwrap().horses.last().unwrap().id;

    let picks = Picks::empty_per_race().with_pick(races[0], pick);
    let receipt = engine
        .submit_entry(tournament_id, OwnerId(1), "Early Bird", picks.clone())
        .unwrap();
    println!("  Pre-lock entry accepted (partial, spend {})", receipt.spend);

    engine.lock_tournament(tournament_id).unwrap();
    println!("  Tournament locked");

    match engine.submit_entry(tournament_id, OwnerId(2), "Late Arrival", picks) {
        Err(EngineError::Roster(RosterError::TournamentLocked(_))) => {
            println!("  Post-lock submission rejected");
        }
        other => println!("  Unexpected outcome: {:?}", other),
    }

    match engine.update_entry(receipt.entry_id, Picks::empty_per_race()) {
        Err(EngineError::Roster(RosterError::TournamentLocked(_))) => {
            println!("  Post-lock re-selection rejected\n");
        }
        other => println!("  Unexpected outcome: {:?}\n", other),
    }
}

/// Raw finish strings become structured results; "1,3" is a dead heat.
fn scenario_4_results_and_dead_heats() {
    println!("Scenario 4: Results and Dead Heats\n");

    let mut engine = Engine::new(EngineConfig::default());
    let (tournament_id, races) = build_two_race_card(&mut engine);
    engine.lock_tournament(tournament_id).unwrap();

    let receipt = engine.record_result(races[0], "1,3", "2", "4").unwrap();
    println!(
        "  Race 1 recorded (complete: {}, replaced: {})",
        receipt.complete, receipt.replaced
    );

    let result = engine.get_result(races[0]).unwrap();
    println!(
        "  Dead heat for the win between {} horses; full points to each",
        result.first.len()
    );

    // a correction re-records the race, replacing the earlier result
    let receipt = engine.record_result(races[0], "1", "3", "2").unwrap();
    println!("  Correction recorded (replaced: {})", receipt.replaced);

    match engine.record_result(races[0], "1", "1", "2") {
        Err(EngineError::Results(ResultError::DuplicateStableNumber { number })) => {
            println!("  Horse {} in two placings rejected\n", number);
        }
        other => println!("  Unexpected outcome: {:?}\n", other),
    }
}

/// Standings fold per-race scores; ties rank by earliest entry.
fn scenario_5_standings() {
    println!("Scenario 5: Standings\n");

    let mut engine = Engine::new(EngineConfig::default());
    let (tournament_id, races) = build_two_race_card(&mut engine);

    let tournament = engine.get_tournament(tournament_id).unwrap();
    let outsiders: Vec<HorseId> = races
        .iter()
        .map(|&r| tournament.race(r).unwrap().horses.last().unwrap().id)
        .collect();
    let mid: Vec<HorseId> = races
        .iter()
        .map(|&r| tournament.race(r).unwrap().horses[2].id)
        .collect();

    let first_in = engine
        .submit_entry(
            tournament_id,
            OwnerId(1),
            "Front Runner",
            Picks::empty_per_race()
                .with_pick(races[0], outsiders[0])
                .with_pick(races[1], outsiders[1]),
        )
        .unwrap();

    engine.advance_time(60_000);
    engine
        .submit_entry(
            tournament_id,
            OwnerId(2),
            "Closer",
            Picks::empty_per_race()
                .with_pick(races[0], mid[0])
                .with_pick(races[1], mid[1]),
        )
        .unwrap();

    engine.lock_tournament(tournament_id).unwrap();

    // outsiders (#4) win race 1; mid-price (#3) takes race 2
    engine.record_result(races[0], "4", "3", "2").unwrap();
    engine.record_result(races[1], "3", "4", "1").unwrap();

    let standings = engine.recompute_leaderboard(tournament_id).unwrap();
    for standing in &standings {
        println!(
            "  rank {}: entry {:?} with {} points",
            standing.rank, standing.entry_id, standing.total_points
        );
    }

    let again = engine.recompute_leaderboard(tournament_id).unwrap();
    println!("  Recompute identical: {}", standings == again);
    println!("  Earliest entrant holds rank 1 on ties: entry {:?}\n", first_in.entry_id);
}

/// Fixed-roster mode: up to K horses from anywhere on the card.
fn scenario_6_roster_mode() {
    println!("Scenario 6: Fixed Roster Mode\n");

    let mut engine = Engine::new(EngineConfig::default());
    let tournament_id = engine
        .create_tournament("Stakes Day Stable", ContestConfig::stakes_roster())
        .unwrap();

    let race = engine
        .add_race(tournament_id, 1, "Allowance", "Churchill Downs", Timestamp::from_millis(0))
        .unwrap();
    for n in 1..=5u32 {
        engine
            .add_horse(
                tournament_id,
                race,
                StableNumber::new(n).unwrap(),
                &format!("Runner {n}"),
                "M. Franco",
                "C. Brown",
                Odds::new_unchecked(rust_decimal::Decimal::from(n * 3)),
            )
            .unwrap();
    }
    engine.assign_prices(tournament_id).unwrap();

    let tournament = engine.get_tournament(tournament_id).unwrap();
    let ids: Vec<HorseId> = tournament.race(race).unwrap().horses.iter().map(|h| h.id).collect();

    // two horses from the same race is legal in roster mode
    let picks = ids[..2]
        .iter()
        .fold(Picks::empty_roster(), |p, &id| p.with_pick(race, id));

    let receipt = engine
        .submit_entry(tournament_id, OwnerId(7), "Stable of Two", picks)
        .unwrap();
    println!("  Roster entry accepted: spend {}", receipt.spend);

    engine.lock_tournament(tournament_id).unwrap();
    engine.record_result(race, "1", "2", "3").unwrap();
    let standings = engine.recompute_leaderboard(tournament_id).unwrap();
    println!(
        "  Roster scored {} points across its runners (win + place)",
        standings[0].total_points
    );
    println!("  Events generated: {}", engine.events().len());
    for event in engine.recent_events(3) {
        println!("    [{}] {:?}", event.id.0, event.payload);
    }
}

/// Two-race card with a default-config tournament, priced and ready.
/// Fields run 4 horses with odds from favorite to outsider.
fn build_two_race_card(engine: &mut Engine) -> (TournamentId, Vec<RaceId>) {
    let tournament_id = engine
        .create_tournament("Derby Day Card", ContestConfig::default())
        .unwrap();

    let mut races = Vec::new();
    for number in 1..=2u32 {
        let race_id = engine
            .add_race(
                tournament_id,
                number,
                &format!("Race {number}"),
                "Churchill Downs",
                Timestamp::from_millis(number as i64 * 1_800_000),
            )
            .unwrap();

        for (i, line) in ["1", "5-2", "8", "20"].iter().enumerate() {
            engine
                .add_horse(
                    tournament_id,
                    race_id,
                    StableNumber::new(i as u32 + 1).unwrap(),
                    &format!("Runner {}-{}", number, i + 1),
                    "T. Gaffalione",
                    "S. Asmussen",
                    parse_odds(line).unwrap(),
                )
                .unwrap();
        }
        races.push(race_id);
    }

    engine.assign_prices(tournament_id).unwrap();
    (tournament_id, races)
}
