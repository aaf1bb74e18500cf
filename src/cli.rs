use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::eyre;

use genie::{
    config::{parse_config, parse_config_from_file, Config},
    dds::DdsFile,
    decode_frames,
    palette::ColorPalette,
    serial::FormatVersion,
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct GenieCli {
    /// Sets path to a config file instead of `config.toml` next to the binary
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decodes SMP frames and prints what they hold
    Smp {
        /// Sets path to the .smp file
        #[arg(short, long)]
        path: PathBuf,
        /// Offset of a frame header, can be repeated
        ///
        /// Defaults to a single frame at the start of the file
        #[arg(short, long)]
        offset: Vec<usize>,
        /// Game release the file comes from, overrides the config
        #[arg(short, long)]
        version: Option<FormatVersion>,
    },
    /// Prints the layout of a .dds texture
    Dds {
        #[arg(short, long)]
        path: PathBuf,
    },
    /// Prints the colors of a JASC-PAL palette
    Palette {
        #[arg(short, long)]
        path: PathBuf,
        /// How many colors to print
        #[arg(short, long, default_value_t = 16)]
        count: usize,
    },
}

impl GenieCli {
    pub fn config(&self) -> eyre::Result<Config> {
        match &self.config {
            Some(path) => parse_config_from_file(path),
            None => parse_config(),
        }
    }
}

pub fn run(cli: GenieCli, config: Config) -> eyre::Result<()> {
    match cli.command {
        Commands::Smp {
            path,
            offset,
            version,
        } => {
            let version = match version {
                Some(version) => version,
                None => config.format_version()?,
            };

            smp(path, offset, version)
        }
        Commands::Dds { path } => dds(path),
        Commands::Palette { path, count } => palette(path, count),
    }
}

fn smp(path: PathBuf, offsets: Vec<usize>, version: FormatVersion) -> eyre::Result<()> {
    let bytes = std::fs::read(&path)?;
    let offsets = if offsets.is_empty() { vec![0] } else { offsets };

    let frames = decode_frames(&bytes, &offsets, version);
    let mut failed = 0;

    for (offset, frame) in offsets.iter().zip(frames) {
        match frame {
            Ok(frame) => {
                let header = &frame.header;

                println!(
                    "{offset}: {}x{} hotspot ({}, {}) layer {:?}, {} pixels, {} player color pixels",
                    header.width,
                    header.height,
                    header.hotspot_x,
                    header.hotspot_y,
                    header
                        .layer()
                        .map(|layer| format!("{layer:?}"))
                        .unwrap_or_else(|| format!("{:#x}", header.layer_type)),
                    frame.pixels.len(),
                    frame.player_color_overlay.len()
                );
            }
            Err(err) => {
                failed += 1;
                println!("{offset}: {err}");
            }
        }
    }

    if failed > 0 {
        return Err(eyre!(
            "Failed to decode {failed} of {} frames in {}",
            offsets.len(),
            path.display()
        ));
    }

    Ok(())
}

fn dds(path: PathBuf) -> eyre::Result<()> {
    let dds = DdsFile::open_from_file(&path)?;

    println!(
        "{}x{}x{}, {} mips, {} slices{}",
        dds.width,
        dds.height,
        dds.depth,
        dds.mips,
        dds.slices,
        if dds.cubemap { " (cubemap)" } else { "" }
    );
    println!(
        "{:?}, {} bytes per element",
        dds.format,
        dds.format.element_size()
    );

    Ok(())
}

fn palette(path: PathBuf, count: usize) -> eyre::Result<()> {
    let palette = ColorPalette::open_from_file(&path)?;

    println!("{} colors", palette.len());

    for (index, color) in palette.colors.iter().take(count).enumerate() {
        println!("{index:3}: {} {} {}", color.r, color.g, color.b);
    }

    Ok(())
}
