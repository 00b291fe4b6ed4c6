//! VGA verification harness binary.
//!
//! Drives the built-in pattern generator through the reset sequence,
//! checks HSYNC timing against the 640x480@60 standard, and captures a
//! preview frame as a PPM (plus optional PNG and JSON report).

use std::path::PathBuf;
use std::process;

use vga_bench::bench::PIXEL_CLOCK;
use vga_bench::report::{RunReport, save_report};
use vga_bench::{BenchConfig, CaptureWindow, VgaBench, capture};
use vga_pattern::PatternGenerator;

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

struct CliArgs {
    mode: u8,
    aux: u8,
    window: (u16, u16),
    pulses: u32,
    out_path: PathBuf,
    screenshot_path: Option<PathBuf>,
    report_path: Option<PathBuf>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        mode: 3,
        aux: 0,
        window: (200, 150),
        pulses: 3,
        out_path: PathBuf::from("frame_200x150.ppm"),
        screenshot_path: None,
        report_path: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.mode = s.parse().unwrap_or(3);
                }
            }
            "--aux" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.aux = s.parse().unwrap_or(0);
                }
            }
            "--window" => {
                i += 1;
                match args.get(i).and_then(|s| parse_window(s)) {
                    Some(dims) => cli.window = dims,
                    None => {
                        eprintln!("--window expects WIDTHxHEIGHT, e.g. 200x150");
                        process::exit(1);
                    }
                }
            }
            "--pulses" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.pulses = s.parse().unwrap_or(3);
                }
            }
            "--out" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.out_path = PathBuf::from(s);
                }
            }
            "--screenshot" => {
                i += 1;
                cli.screenshot_path = args.get(i).map(PathBuf::from);
            }
            "--report" => {
                i += 1;
                cli.report_path = args.get(i).map(PathBuf::from);
            }
            "--help" | "-h" => {
                eprintln!("Usage: vga-bench [OPTIONS]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --mode <n>          Mode/palette input port value [default: 3]");
                eprintln!("  --aux <n>           Auxiliary input port value [default: 0]");
                eprintln!("  --window <WxH>      Capture window [default: 200x150]");
                eprintln!("  --pulses <n>        HSYNC pulses to check [default: 3]");
                eprintln!("  --out <file>        PPM output path [default: frame_200x150.ppm]");
                eprintln!("  --screenshot <file> Also save the frame as a PNG");
                eprintln!("  --report <file>     Write a JSON run report");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn parse_window(s: &str) -> Option<(u16, u16)> {
    let (w, h) = s.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

// ---------------------------------------------------------------------------
// Verification run
// ---------------------------------------------------------------------------

fn main() {
    let cli = parse_args();

    let window = match CaptureWindow::new(cli.window.0, cli.window.1) {
        Ok(window) => window,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    let config = BenchConfig {
        mode: cli.mode,
        aux: cli.aux,
        window,
        sync_pulses: cli.pulses,
        ..BenchConfig::default()
    };

    eprintln!(
        "Start VGA timing & snapshot run: {} MHz pixel clock ({} ns period), mode {}",
        PIXEL_CLOCK.frequency_hz / 1_000_000,
        PIXEL_CLOCK.period_ns(),
        config.mode,
    );

    let mut bench = VgaBench::new(PatternGenerator::new(), config);
    let outcome = match bench.run() {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("FAIL: {e}");
            process::exit(1);
        }
    };

    for m in &outcome.pulses {
        eprintln!("HSYNC ok: low={}, period={}", m.low_width, m.period);
    }
    eprintln!("Run complete after {} simulated cycles", outcome.elapsed.get());

    if let Err(e) = capture::save_ppm(&outcome.frame, &cli.out_path) {
        eprintln!("PPM write error: {e}");
        process::exit(1);
    }
    eprintln!("Generated {}", cli.out_path.display());

    if let Some(ref path) = cli.screenshot_path {
        if let Err(e) = capture::save_screenshot(&outcome.frame, path) {
            eprintln!("Screenshot error: {e}");
            process::exit(1);
        }
        eprintln!("Screenshot saved to {}", path.display());
    }

    if let Some(ref path) = cli.report_path {
        let report = RunReport::new(&config, &outcome);
        if let Err(e) = save_report(&report, path) {
            eprintln!("Report write error: {e}");
            process::exit(1);
        }
        eprintln!("Report saved to {}", path.display());
    }
}
