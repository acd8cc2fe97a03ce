use std::time::Duration;

use resonator_core::{AppConfigExt, CombatController, CombatState, parse_with_warnings};
use serde_json::json;

use crate::context::CliContext;
use crate::dry_run::{DryRunHost, Scenario};

/// Options for a simulated encounter.
#[derive(Debug, Clone, Default)]
pub struct SimulateOptions {
    /// Overrides the configured rotation and enables rotation mode
    pub rotation: Option<String>,
    pub combat_secs: f64,
    pub die_after_secs: Option<f64>,
    pub heuristic: bool,
    pub realm: bool,
    pub open_world: bool,
    pub json: bool,
}

pub fn parse_rotation(rotation: &str) -> Result<(), String> {
    let parsed = parse_with_warnings(rotation);

    if parsed.steps.is_empty() {
        println!("No steps parsed");
    } else {
        for (index, step) in parsed.steps.iter().enumerate() {
            println!("{:>3}  {}", index + 1, step);
        }
    }

    for warning in &parsed.warnings {
        println!("warning: {warning}");
    }

    println!(
        "\nTotal: {} steps, {} warnings",
        parsed.steps.len(),
        parsed.warnings.len()
    );
    Ok(())
}

pub fn simulate(options: &SimulateOptions, ctx: &CliContext) -> Result<(), String> {
    let combat_length = secs(options.combat_secs, "--combat-secs")?;
    let death_at = options
        .die_after_secs
        .map(|s| secs(s, "--die-after"))
        .transpose()?;

    let mut combat = ctx.config.combat.clone();
    if let Some(rotation) = &options.rotation {
        combat.rotation = rotation.trim().to_string();
        combat.rotation_mode = true;
    }
    if options.heuristic {
        combat.rotation_mode = false;
    }

    let scenario = Scenario {
        combat_length,
        death_at,
        open_world: options.open_world,
        illusive_realm: options.realm,
    };
    let host = DryRunHost::new(scenario, ctx.config.keys.clone());
    let mut controller = CombatController::new(host);
    let report = controller.run(&combat);
    let state = controller.state();
    let tally = &controller.host().tally;

    if options.json {
        let output = json!({
            "report": report,
            "state": state,
            "tally": tally.to_json(),
        });
        let text = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    if !report.engaged {
        println!("Nothing happened");
        return Ok(());
    }

    println!("Mode:      {:?}", report.mode);
    println!("Cycles:    {}", report.cycles);
    println!("Ended:     {:?}", report.end);
    println!("Elapsed:   {:.2}s", report.elapsed.as_secs_f64());
    println!("State:     {}", describe_state(state));
    println!("Clicks:    {}", tally.clicks);
    println!("Holds:     {}/{}", tally.mouse_downs, tally.mouse_ups);
    println!("Frames:    {}", tally.frames);
    if tally.performs > 0 {
        println!("Heuristic: {} steps", tally.performs);
    }
    if !tally.keys.is_empty() {
        println!("\n{:<10} Presses", "Key");
        println!("{}", "-".repeat(20));
        for (key, count) in &tally.keys {
            println!("{key:<10} {count}");
        }
    }
    for error in &tally.errors {
        println!("error: {error}");
    }
    Ok(())
}

pub fn show_config(ctx: &CliContext) -> Result<(), String> {
    let combat = &ctx.config.combat;
    let keys = &ctx.config.keys;

    println!("Config file:     {}", ctx.config_location());
    println!("Auto target:     {}", combat.auto_target);
    println!("Use liberation:  {}", combat.use_liberation);
    println!("Check levitator: {}", combat.check_levitator);
    println!("Rotation mode:   {}", combat.rotation_mode);
    println!(
        "Rotation:        {}",
        if combat.rotation.is_empty() {
            "<none>"
        } else {
            &combat.rotation
        }
    );
    println!(
        "Keys:            resonance={} echo={} liberation={} dodge={} jump={}",
        keys.resonance_key, keys.echo_key, keys.liberation_key, keys.dodge_key, keys.jump_key
    );
    Ok(())
}

pub fn set_rotation(rotation: &str, ctx: &mut CliContext) -> Result<(), String> {
    let parsed = parse_with_warnings(rotation);
    for warning in &parsed.warnings {
        println!("warning: {warning}");
    }
    ctx.config.set_rotation(rotation);
    ctx.save().map_err(|e| e.to_string())?;
    println!("Rotation saved ({} steps)", parsed.steps.len());
    Ok(())
}

pub fn set_mode(enabled: bool, ctx: &mut CliContext) -> Result<(), String> {
    ctx.config.combat.rotation_mode = enabled;
    ctx.save().map_err(|e| e.to_string())?;
    println!("Rotation mode {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

pub fn set_key(action: &str, key: &str, ctx: &mut CliContext) -> Result<(), String> {
    ctx.config
        .set_key_binding(action, key)
        .map_err(|e| e.to_string())?;
    ctx.save().map_err(|e| e.to_string())?;
    println!("{action} bound to {key}");
    Ok(())
}

pub fn exit() {
    println!("quitting...");
}

fn secs(value: f64, flag: &str) -> Result<Duration, String> {
    Duration::try_from_secs_f64(value).map_err(|_| format!("error: {flag} must be a non-negative number"))
}

fn describe_state(state: CombatState) -> String {
    match state {
        CombatState::OutOfCombat => "out of combat".to_string(),
        CombatState::Running(mode) => format!("running ({mode:?})"),
        CombatState::Ended(reason) => format!("ended ({reason:?})"),
    }
}
