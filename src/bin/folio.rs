use std::{
    collections::BTreeMap,
    io::{self, Write as _},
    net::SocketAddr,
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use folio::{
    ElementId, GridOverlay, Millis, OverlayConfig, Point, Rect, RelayConfig, Section, SectionPlan,
    Size, StaticLayout, StyleBuffer, TextScramble, Viewport, presets,
};

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the contact relay server.
    Serve(ServeArgs),
    /// Print a section preset's element states at given scroll offsets as JSON.
    Sample(SampleArgs),
    /// Print every frame of the text scramble effect.
    Scramble(ScrambleArgs),
    /// Print an ASCII frame of the pointer grid overlay.
    Grid(GridArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Relay config JSON. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, env = "FOLIO_BIND")]
    bind: Option<SocketAddr>,

    /// Downstream webhook URL.
    #[arg(long, env = "FOLIO_WEBHOOK_URL")]
    webhook_url: Option<String>,

    #[arg(long, env = "FOLIO_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    #[arg(long)]
    route: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SectionChoice {
    Hero,
    About,
    Skills,
    Experience,
    Projects,
    Contact,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[arg(long, value_enum)]
    section: SectionChoice,

    /// Scroll offsets in px, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "0")]
    offsets: Vec<f64>,

    /// Clock advance after each offset, so time-based playback can finish.
    #[arg(long, default_value_t = 3000)]
    settle_ms: u64,

    #[arg(long, default_value_t = 900.0)]
    viewport_height: f64,
}

#[derive(Parser, Debug)]
struct ScrambleArgs {
    #[arg(long)]
    text: String,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct GridArgs {
    #[arg(long, default_value_t = 200.0)]
    width: f64,

    #[arg(long, default_value_t = 100.0)]
    height: f64,

    /// Pointer position inside the host.
    #[arg(long, default_value_t = 100.0)]
    x: f64,

    #[arg(long, default_value_t = 50.0)]
    y: f64,

    /// Time between the pointer move and the printed frame.
    #[arg(long, default_value_t = 200)]
    after_ms: u64,

    /// Overlay config JSON (camelCase keys).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Scramble(args) => cmd_scramble(args),
        Command::Grid(args) => cmd_grid(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => RelayConfig::from_path(path)
            .with_context(|| format!("load relay config '{}'", path.display()))?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = args.bind {
        cfg.bind = bind;
    }
    if let Some(url) = args.webhook_url {
        cfg.webhook_url = url;
    }
    if let Some(ms) = args.timeout_ms {
        cfg.timeout_ms = ms;
    }
    if let Some(route) = args.route {
        cfg.route = route;
    }
    cfg.validate().context("relay config")?;

    let rt = tokio::runtime::Runtime::new().context("start tokio runtime")?;
    rt.block_on(folio::contact::relay::serve(cfg))?;
    Ok(())
}

/// Stacks demo elements down a page, one block per element.
struct DemoPage {
    next: u32,
    y: f64,
    layout: StaticLayout,
}

impl DemoPage {
    const BLOCK: f64 = 240.0;

    fn new(viewport_height: f64) -> anyhow::Result<Self> {
        Ok(Self {
            next: 1,
            y: 0.0,
            layout: StaticLayout::new(Viewport::new(1440.0, viewport_height)?),
        })
    }

    fn sized(&mut self, height: f64) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        self.layout
            .insert(id, Rect::new(0.0, self.y, 1440.0, self.y + height));
        self.y += height;
        id
    }

    fn one(&mut self) -> ElementId {
        self.sized(Self::BLOCK)
    }

    fn many(&mut self, n: usize) -> Vec<ElementId> {
        (0..n).map(|_| self.one()).collect()
    }

    /// A section element spanning everything allocated inside `fill`.
    fn section<T>(&mut self, fill: impl FnOnce(&mut Self) -> T) -> (ElementId, T) {
        let id = ElementId(self.next);
        self.next += 1;
        let top = self.y;
        let inner = fill(self);
        self.layout
            .insert(id, Rect::new(0.0, top, 1440.0, self.y.max(top + 1.0)));
        (id, inner)
    }
}

fn demo_plan(choice: SectionChoice, page: &mut DemoPage) -> SectionPlan {
    match choice {
        SectionChoice::Hero => {
            let (section, mut t) = page.section(|p| presets::HeroTargets {
                section: ElementId(0),
                content: p.one(),
                label: p.one(),
                name: p.one(),
                title: p.one(),
                description: p.one(),
                buttons: p.many(2),
                image: p.one(),
                stats: p.many(3),
                glows: p.many(2),
            });
            t.section = section;
            presets::hero(&t)
        }
        SectionChoice::About => {
            let (section, mut t) = page.section(|p| presets::AboutTargets {
                section: ElementId(0),
                title: p.one(),
                card: p.one(),
                edu_grid: p.one(),
                edu_cards: p.many(2),
                interests_grid: p.one(),
                interests: p.many(4),
                deco: p.one(),
            });
            t.section = section;
            presets::about(&t)
        }
        SectionChoice::Skills => {
            let (section, mut t) = page.section(|p| presets::SkillsTargets {
                section: ElementId(0),
                title: p.one(),
                grid: p.one(),
                groups: p.many(4),
                tags: p.many(12),
                glow: p.one(),
            });
            t.section = section;
            presets::skills(&t)
        }
        SectionChoice::Experience => {
            let (section, mut t) = page.section(|p| presets::ExperienceTargets {
                section: ElementId(0),
                title: p.one(),
                grid: p.one(),
                line: p.one(),
                cards: (0..3)
                    .map(|_| presets::ExperienceCard {
                        card: p.one(),
                        indicator: p.one(),
                        number: p.one(),
                        items: p.many(3),
                    })
                    .collect(),
                accent: p.one(),
            });
            t.section = section;
            presets::experience(&t)
        }
        SectionChoice::Projects => {
            let title = page.one();
            let panels = page.many(3);
            let panel_parts = (0..3)
                .map(|_| presets::ProjectPanel {
                    content: page.one(),
                    number: page.one(),
                    title: page.one(),
                    tags: page.many(3),
                    description: page.one(),
                    button: page.one(),
                })
                .collect();
            let vh = page.layout.viewport.height;
            let strip = page.sized(vh * 3.0);
            presets::projects(&presets::ProjectsTargets {
                title,
                strip,
                panels,
                panel_parts,
                dots: page.many(3),
            })
        }
        SectionChoice::Contact => {
            let (section, mut t) = page.section(|p| presets::ContactTargets {
                section: ElementId(0),
                title: p.one(),
                grid: p.one(),
                form: p.one(),
                form_groups: p.many(3),
                submit: p.one(),
                info: p.one(),
                items: p.many(3),
                portfolio_button: p.one(),
                footer: p.one(),
                glow: p.one(),
            });
            t.section = section;
            presets::contact(&t)
        }
    }
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let mut page = DemoPage::new(args.viewport_height).context("viewport")?;
    let plan = demo_plan(args.section, &mut page);
    let mut section = Section::mount(plan, &page.layout, Millis::ZERO);
    for (index, err) in section.skipped() {
        tracing::warn!(index, %err, "preset step skipped");
    }

    let mut surface = StyleBuffer::new();
    let mut now = Millis::ZERO;
    let mut samples = Vec::with_capacity(args.offsets.len());
    for offset in &args.offsets {
        section.on_scroll(*offset, &mut surface);
        section.on_frame(now, &mut surface);
        now = now.saturating_add(Millis(args.settle_ms));
        section.on_frame(now, &mut surface);

        let elements: BTreeMap<String, _> = surface
            .styles()
            .iter()
            .map(|(el, state)| (el.0.to_string(), state))
            .collect();
        samples.push(serde_json::json!({
            "offset": offset,
            "timeMs": now.0,
            "elements": elements,
        }));
    }
    section.unmount();

    let out = serde_json::to_string_pretty(&samples).context("serialize samples")?;
    println!("{out}");
    Ok(())
}

fn cmd_scramble(args: ScrambleArgs) -> anyhow::Result<()> {
    let mut fx = match args.seed {
        Some(seed) => TextScramble::with_seed(&args.text, seed),
        None => TextScramble::new(&args.text),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut now = Millis::ZERO;
    fx.hover_enter(now);
    while fx.is_running() {
        now = now.saturating_add(folio::effects::scramble::TICK);
        if fx.on_frame(now) {
            writeln!(out, "{}", fx.display()).context("write frame")?;
        }
    }
    Ok(())
}

fn cmd_grid(args: GridArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read overlay config '{}'", path.display()))?;
            OverlayConfig::from_json_str(&raw)?
        }
        None => OverlayConfig::default(),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }

    let mut grid = GridOverlay::mount(Size::new(args.width, args.height), cfg)?;
    grid.on_pointer_move(Point::new(args.x, args.y), Millis::ZERO);
    grid.on_frame(Millis(args.after_ms));
    print!("{}", grid.render_text());
    grid.unmount();
    Ok(())
}
