mod demo;

use clap::{Parser, ValueEnum};

use campaign_plots::plots;
use campaign_plots::{DEFAULT_EXCLUDE_COL, DEFAULT_TARGET_COL};

/// Which of the figures to show.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum FigureKind {
    CategoricalDistributions,
    TargetDistribution,
    CompareCategorical,
    CompareTarget,
    CompareNumeric,
    NumericDistributions,
    CompareBoxplots,
    StackedBar,
    CompareStackedBar,
    NumericBoxplots,
}

#[derive(Parser, Debug)]
#[command(name = "campaign-plots")]
#[command(about = "Distribution plots of a synthetic campaign/control dataset")]
struct Args {
    /// Figure to show
    #[arg(value_enum)]
    figure: FigureKind,

    /// Rows per group
    #[arg(short, long, default_value_t = 2000)]
    rows: usize,

    /// Seed of the generated data
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Category column of the stacked-bar figures
    #[arg(short, long, default_value = "job")]
    column: String,

    /// Log level (debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let (campaign, control) = demo::campaign_and_control(args.rows, args.seed)?;
    log::info!(
        "generated {} campaign and {} control rows (seed {})",
        campaign.len(),
        control.len(),
        args.seed
    );
    log::debug!("campaign sample:\n{}", campaign.preview(5)?);

    let categorical = &demo::CATEGORICAL_COLS;
    let numeric = &demo::NUMERIC_COLS;
    // The comparison figures take no exclusion column.
    let measures = &numeric[1..];
    let target = DEFAULT_TARGET_COL;

    match args.figure {
        FigureKind::CategoricalDistributions => {
            plots::plot_categorical_distributions(&campaign, categorical)?
        }
        FigureKind::TargetDistribution => {
            plots::plot_target_distribution(&campaign, categorical, target)?
        }
        FigureKind::CompareCategorical => {
            plots::compare_categorical_distributions(&campaign, &control, categorical)?
        }
        FigureKind::CompareTarget => {
            plots::compare_target_distributions(&campaign, &control, categorical, target)?
        }
        FigureKind::CompareNumeric => {
            plots::compare_numeric_distributions(&campaign, &control, measures, target)?
        }
        FigureKind::NumericDistributions => {
            plots::plot_numeric_distributions(&campaign, numeric, target, DEFAULT_EXCLUDE_COL)?
        }
        FigureKind::CompareBoxplots => {
            plots::compare_boxplots(&campaign, &control, measures, target)?
        }
        FigureKind::StackedBar => plots::plot_stacked_bar(&campaign, &args.column, target)?,
        FigureKind::CompareStackedBar => {
            plots::compare_stacked_bar(&campaign, &control, &args.column, target)?
        }
        FigureKind::NumericBoxplots => {
            plots::plot_numeric_boxplots(&campaign, numeric, target, DEFAULT_EXCLUDE_COL)?
        }
    }

    Ok(())
}
