//! Generates the scalability report: charts and tables from the detector's CSV
//! output, written to the configured output directory.

extern crate chrono;
extern crate env_logger;
extern crate scalereport;
extern crate structopt;

use scalereport::Setting;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "scalereport")]
#[structopt(about = "Generate scalability and detection graphs for the report.")]
struct Opt {
    /// Scalability summary produced by the detector (CSV).
    #[structopt(parse(from_os_str))]
    scalability_csv: Option<PathBuf>,

    /// Report setting (TOML); defaults apply when omitted.
    #[structopt(short = "s", long = "setting", parse(from_os_str))]
    setting: Option<PathBuf>,

    /// Output directory, overrides the setting.
    #[structopt(short = "o", long = "output-dir", parse(from_os_str))]
    output_dir: Option<PathBuf>,

    /// Resolution of the charts, overrides the setting.
    #[structopt(long = "dpi")]
    dpi: Option<u32>,
}

fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| {
        let t = chrono::Utc::now();
        writeln!(
            buf,
            "{} {}:{}: {}",
            t.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.module_path().unwrap_or(""),
            record.args()
        )
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() {
    init_logger();
    let opt = Opt::from_args();

    let mut setting = match opt.setting {
        Some(ref path) => match Setting::init(path) {
            Ok(setting) => setting,
            Err(e) => {
                println!("[ERROR] {}", e);
                process::exit(1);
            }
        },
        None => Setting::default(),
    };
    if let Some(dir) = opt.output_dir {
        setting.output_dir = dir;
    }
    if let Some(dpi) = opt.dpi {
        setting.dpi = dpi;
    }

    let stdout = io::stdout();
    let mut console = stdout.lock();
    let code = match scalereport::run(opt.scalability_csv.as_ref().map(|p| p.as_path()), &setting, &mut console) {
        Ok(ref summary) if summary.success() => 0,
        Ok(_) => 1,
        Err(e) => {
            let _ = writeln!(console, "[ERROR] Failed to generate graphs: {}", e);
            1
        }
    };
    let _ = console.flush();
    drop(console);
    process::exit(code);
}
