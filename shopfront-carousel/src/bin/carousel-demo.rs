use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Target};
use log::{LevelFilter, info, warn};
use serde::Deserialize;
use shopfront_carousel::{
    CarouselConfig, CarouselHandle, CarouselMessage, CarouselRuntime,
    CarouselSettings, FixedMetrics, IndexTrack, InteractionEvent, OffsetTrack,
    Track, TransitionMode, Update,
};
use shopfront_model::{Banner, Category, Item, Product};

/// Time the simulated render layer takes to finish an animated move.
const TRANSITION: Duration = Duration::from_millis(500);

/// How long the simulated pointer stays over the carousel.
const HOVER_FOR: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Variant {
    Banner,
    ProductRail,
    CategoryStrip,
}

#[derive(Debug, Parser)]
#[command(
    name = "carousel-demo",
    about = "Run a storefront carousel headless and print its motions"
)]
struct Cli {
    #[arg(long, value_enum, default_value = "banner")]
    variant: Variant,
    /// TOML carousel settings; presets are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON catalogue with `banners`, `products` and `categories`
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long, default_value_t = 21_000)]
    run_ms: u64,
    /// Rendered item width plus gap
    #[arg(long, default_value_t = 300.0)]
    step_px: f64,
    /// Hover the carousel at this point of the run
    #[arg(long)]
    hover_at_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Catalog {
    banners: Vec<Banner>,
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading catalogue {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing catalogue {}", path.display()))
    }

    fn sample() -> Self {
        let banners = [
            ("/img/banner-carnes.jpg", "Ofertas en carnes seleccionadas"),
            ("/img/banner-promocional.jpg", "Promociones de la semana"),
            ("/img/banner-pan.jpg", "Panadería fresca todos los días"),
            ("/img/banner-vinos.jpg", "Vinos para cada ocasión"),
        ]
        .into_iter()
        .map(|(src, alt)| Banner::new(src, alt))
        .collect();

        let products = (1..=10)
            .map(|id| Product {
                id,
                name: format!("Producto {id}"),
                brand: Some(if id % 2 == 0 { "Sol" } else { "Campo" }.into()),
                price: 1_000.0 + f64::from(id) * 250.0,
                original_price: (id % 3 == 0)
                    .then(|| 1_200.0 + f64::from(id) * 250.0),
                image: format!("/img/producto-{id}.jpg"),
            })
            .collect();

        let categories = [
            "Almacén",
            "Bebidas",
            "Frescos",
            "Limpieza",
            "Perfumería",
            "Congelados",
        ]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Category {
            id,
            name: name.into(),
            image: None,
            href: Some(format!("/categoria/{id}")),
        })
        .collect();

        Self {
            banners,
            products,
            categories,
        }
    }

    /// Display items for `variant`, dropping records that fail validation.
    fn items(&self, variant: Variant) -> Vec<Item> {
        match variant {
            Variant::Banner => self
                .banners
                .iter()
                .filter(|banner| keep(banner.validate(), &banner.alt))
                .map(Item::from)
                .collect(),
            Variant::ProductRail => self
                .products
                .iter()
                .filter(|product| keep(product.validate(), &product.name))
                .map(Item::from)
                .collect(),
            Variant::CategoryStrip => self
                .categories
                .iter()
                .filter(|category| keep(category.validate(), &category.name))
                .map(Item::from)
                .collect(),
        }
    }
}

fn keep(result: shopfront_model::ModelResult<()>, label: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!("Skipping catalogue record {label:?}: {err}");
            false
        }
    }
}

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("shopfront_carousel", LevelFilter::Debug)
        .filter_module("carousel_demo", LevelFilter::Info)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => CarouselSettings::load(path)?,
        None => CarouselSettings::default(),
    };
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::sample(),
    };
    let items = catalog.items(cli.variant);
    info!("Running {:?} with {} items", cli.variant, items.len());

    let metrics = FixedMetrics::new(cli.step_px);
    match cli.variant {
        Variant::Banner => {
            drive::<IndexTrack>(settings.banner, metrics, items, &cli).await
        }
        Variant::ProductRail => {
            drive::<OffsetTrack>(settings.product_rail, metrics, items, &cli)
                .await
        }
        Variant::CategoryStrip => {
            drive::<IndexTrack>(settings.category_strip, metrics, items, &cli)
                .await
        }
    }
}

async fn drive<T: Track + Send + 'static>(
    config: CarouselConfig,
    metrics: FixedMetrics,
    items: Vec<Item>,
    cli: &Cli,
) -> Result<()> {
    let step_px = cli.step_px;
    let track = T::for_items(items.len(), &config);
    let (runtime, handle, mut updates) =
        CarouselRuntime::<T, _>::new(config, metrics)?;
    let carousel_task = tokio::spawn(runtime.run());

    let render_handle = handle.clone();
    let render_task = tokio::spawn(async move {
        let mut rendered = 0;
        while let Some(update) = updates.recv().await {
            rendered += update.motions.len();
            render(&render_handle, &track, update, step_px);
        }
        rendered
    });

    if let Some(at) = cli.hover_at_ms {
        let hover = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(at)).await;
            hover.interaction(InteractionEvent::PointerEnter);
            tokio::time::sleep(HOVER_FOR).await;
            hover.interaction(InteractionEvent::PointerLeave);
        });
    }

    handle.mount(items);
    tokio::time::sleep(Duration::from_millis(cli.run_ms)).await;
    handle.unmount();

    let carousel = carousel_task.await.context("carousel task failed")?;
    let rendered = render_task.await.context("render task failed")?;
    info!(
        "Stopped after {rendered} position writes (autoplay armed: {})",
        carousel.scheduler().is_armed()
    );
    Ok(())
}

/// Stand-in for the render layer: log each write and report animated moves
/// back once they would have finished.
fn render<T: Track>(
    handle: &CarouselHandle,
    track: &T,
    update: Update<T::Position>,
    step_px: f64,
) {
    for motion in &update.motions {
        match motion.mode {
            TransitionMode::Instant => info!("jump   -> {:?}", motion.to),
            TransitionMode::Animated => info!("slide  -> {:?}", motion.to),
        }
    }
    for output in &update.outputs {
        info!("output {output:?}");
    }

    let Some(last) = update.motions.last() else {
        return;
    };
    if last.mode != TransitionMode::Animated {
        return;
    }
    // Native scrolling reports where it settled; index tracks ignore it
    let settled_px = track.offset_px(last.to, step_px);
    let handle = handle.clone();
    tokio::spawn(async move {
        tokio::time::sleep(TRANSITION).await;
        handle.send(CarouselMessage::TransitionEnded);
        handle.send(CarouselMessage::Scrolled(settled_px));
    });
}
