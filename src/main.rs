//! raster-dispatch: plain-language front end for raster analysis tools
//!
//! Reads requests such as "crop scene.tif from 10,20 to 30,40", works out which
//! tools to call with which parameters, and sends them to a JSON-RPC tool server.

use anyhow::Result;

fn main() -> Result<()> {
    raster_dispatch::cli::run()
}
