//! Office Arena headless runner
//!
//! Mounts a session, drives it with seeded wander input at a fixed frame
//! rate and logs a summary.
//!
//! Usage: `office-arena [preset|config.json] [ticks] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::str::FromStr;

    use glam::Vec2;
    use office_arena::consts::SIM_DT;
    use office_arena::sim::{Arena, WanderInput};
    use office_arena::{ArenaPreset, ConfigError, PlayerFrame, RenderSink, SessionConfig, SessionHost};

    const DEFAULT_TICKS: u64 = 3600;
    const DEFAULT_SEED: u64 = 0x0ff1ce;

    /// Tallies what a renderer would have drawn
    #[derive(Default)]
    struct SummarySink {
        colliders: usize,
        decorations: usize,
        frames: u64,
        turns: u32,
        distance: f32,
        last: Option<PlayerFrame>,
    }

    impl RenderSink for SummarySink {
        fn scene(&mut self, arena: &Arena, spawn: &PlayerFrame) {
            self.colliders = arena.colliders.len();
            self.decorations = arena.decorations.len();
            self.last = Some(*spawn);
            log::info!(
                "Scene: {}x{} world, {} colliders, {} decorations",
                arena.world.width,
                arena.world.height,
                self.colliders,
                self.decorations
            );
        }

        fn frame(&mut self, frame: &PlayerFrame) {
            if let Some(prev) = self.last {
                self.distance += (frame.position - prev.position).length();
                if prev.facing_right != frame.facing_right {
                    self.turns += 1;
                }
            }
            self.frames += 1;
            self.last = Some(*frame);
        }
    }

    fn parse_or<T: FromStr>(arg: Option<String>, default: T, what: &str) -> T {
        match arg {
            Some(s) => s.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid {what} '{s}'");
                default
            }),
            None => default,
        }
    }

    pub fn run() -> Result<(), ConfigError> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(arg) if arg.ends_with(".json") => SessionConfig::load(&arg)?,
            Some(arg) => SessionConfig::preset(arg.parse::<ArenaPreset>()?),
            None => SessionConfig::preset(ArenaPreset::default()),
        };
        let ticks = parse_or(args.next(), DEFAULT_TICKS, "tick count");
        let seed = parse_or(args.next(), DEFAULT_SEED, "seed");

        log::info!("Office Arena (native) starting: {ticks} ticks, seed {seed:#x}");

        let mut host = SessionHost::new();
        let mut sink = SummarySink::default();
        host.mount(config, &mut sink)?;

        let mut input = WanderInput::new(seed);
        let mut ran = 0u64;
        while ran < ticks {
            ran += u64::from(host.frame(SIM_DT, &mut input, &mut sink));
        }

        let last = sink.last.map(|f| f.position).unwrap_or(Vec2::ZERO);
        log::info!(
            "Finished {} ticks: final position ({:.2}, {:.2}), travelled {:.1} units, turned {} times",
            sink.frames,
            last.x,
            last.y,
            sink.distance,
            sink.turns
        );

        host.unmount();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), office_arena::ConfigError> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is embedded by a host page; there is no standalone entry point
}
