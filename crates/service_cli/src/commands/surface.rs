//! Surface command implementation

use clap::Args;
use pricer_models::analytical::{greek_surface, GreekKind, GreekSurface};

use super::MarketArgs;
use crate::Result;

/// Arguments of `optpricer surface`
#[derive(Debug, Clone, Args)]
pub struct SurfaceArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Greek to tabulate (delta, gamma, vega, theta, rho)
    #[arg(long, default_value = "delta")]
    pub greek: String,

    /// Intervals per axis; the surface has (grid_size + 1)² nodes
    #[arg(long, default_value_t = 10)]
    pub grid_size: usize,
}

/// Run the surface command
pub fn run(args: &SurfaceArgs) -> Result<GreekSurface> {
    let greek: GreekKind = args.greek.parse()?;
    let m = &args.market;
    let surface = greek_surface(
        m.spot,
        args.strike,
        m.rate,
        m.volatility,
        m.expiry,
        greek,
        args.grid_size,
    )?;
    Ok(surface)
}
