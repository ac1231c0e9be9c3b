use std::{path::PathBuf, process, time::Instant};

use mattecam::{
    capture::{CaptureSource, FileCapture},
    develop::{develop, DevelopOptions},
};

const USAGE: &str = "usage: mattecam <photo> <output> [<skin> <hair> <teeth>]";

fn main() -> anyhow::Result<()> {
    mattecam::init_logger!();

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let mut source = match &*args {
        [photo, _] => FileCapture::new(photo),
        [photo, _, skin, hair, teeth] => FileCapture::new(photo).skin(skin).hair(hair).teeth(teeth),
        _ => {
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };
    let output = &args[1];

    let options = DevelopOptions::from_env()?;
    let captured = source.capture()?;

    let start = Instant::now();
    let developed = develop(&captured, &options);
    log::info!(
        "developed {:?} -> {:?} in {:.2?}",
        captured.photo,
        developed,
        start.elapsed()
    );

    developed.save(output)?;
    Ok(())
}
