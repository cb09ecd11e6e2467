//! Fantasy Shooter entry point
//!
//! Native builds run a headless demo: a scripted pilot flies the configured
//! waves and the frames are recorded into a `DrawList`.
//!
//! Usage: `fantasy-shooter [settings.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use fantasy_shooter::consts::*;
    use fantasy_shooter::platform::Button;
    use fantasy_shooter::renderer::DrawList;
    use fantasy_shooter::{ConfigError, Driver, Settings};

    /// Frames to run when none are given (one minute at 60 Hz)
    const DEFAULT_FRAMES: u64 = 3600;

    pub struct Args {
        pub settings: Option<String>,
        pub frames: u64,
    }

    impl Args {
        pub fn parse() -> Self {
            let mut args = std::env::args().skip(1);
            let settings = args.next();
            let frames = args
                .next()
                .and_then(|f| f.parse().ok())
                .unwrap_or(DEFAULT_FRAMES);
            Self { settings, frames }
        }
    }

    /// Buttons the demo pilot holds on `frame`
    ///
    /// Sweeps side to side, taps fire, and spends each special once.
    fn pilot(frame: u64) -> Vec<Button> {
        let mut held = Vec::with_capacity(3);
        match (frame / 60) % 4 {
            0 => held.push(Button::Left),
            2 => held.push(Button::Right),
            _ => {}
        }
        if frame % 8 < 4 {
            held.push(Button::Fire);
        }
        match frame {
            160..=165 => held.push(Button::Laser),
            420..=425 => held.push(Button::Bomb),
            810..=815 => held.push(Button::Shield),
            _ => {}
        }
        held
    }

    pub fn run(args: &Args) -> Result<(), ConfigError> {
        let settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let mut driver = Driver::new(&settings)?;
        let mut out = DrawList::new(*driver.palette());

        for frame in 0..args.frames {
            driver.update(SIM_DT, pilot(frame), &mut out);
            if driver.is_game_over() {
                break;
            }
        }

        let state = driver.state();
        println!("Ticks:     {}", driver.elapsed_ticks());
        println!("Score:     {}", state.ship.score);
        println!("Health:    {}", state.ship.health);
        println!(
            "Charges:   laser {} / shield {} / bomb {}",
            state.ship.laser, state.ship.shield, state.ship.bomb
        );
        println!("Enemies:   {}", state.enemies.len());
        if let Some(last) = state.waves.last_trigger() {
            let status = if driver.elapsed_ticks() >= last {
                "all launched"
            } else {
                "still incoming"
            };
            println!("Waves:     {status} (last at tick {last})");
        }
        println!("Draw cmds: {}", out.commands().len());
        if driver.is_game_over() {
            println!("GAME OVER");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fantasy Shooter (headless) starting...");

    let args = demo::Args::parse();
    if let Err(e) = demo::run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library; there is no standalone wasm entry point
}
