use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use capsule::{
    Bridge, BridgeOpts, Capsule, CpuRenderer, FileStream, Texture, TextureAccess,
    encode::png::decode_image,
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "capsule", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wrap a file in a capsule, tagged from its extension.
    Pack(PackArgs),
    /// Extract the payload of a capsule.
    Unpack(UnpackArgs),
    /// Print a capsule header.
    Info(InfoArgs),
    /// Decode an image and store it as a PNG capsule through the texture bridge.
    Png(PngArgs),
}

#[derive(Parser, Debug)]
struct PackArgs {
    /// Input file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output capsule path.
    #[arg(long)]
    out: PathBuf,

    /// Override the type tag derived from the file extension.
    #[arg(long = "type")]
    type_tag: Option<u32>,
}

#[derive(Parser, Debug)]
struct UnpackArgs {
    /// Input capsule.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output payload path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input capsule.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct PngArgs {
    /// Input image (any format the decoder supports).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output capsule path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Pack(args) => cmd_pack(args),
        Command::Unpack(args) => cmd_unpack(args),
        Command::Info(args) => cmd_info(args),
        Command::Png(args) => cmd_png(args),
    }
}

fn read_capsule(path: &Path) -> anyhow::Result<Capsule> {
    let f = File::open(path).with_context(|| format!("open capsule '{}'", path.display()))?;
    let mut r = BufReader::new(f);
    Capsule::read_from(&mut r).with_context(|| format!("read capsule '{}'", path.display()))
}

fn write_capsule(caps: &Capsule, path: &Path) -> anyhow::Result<()> {
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut w = BufWriter::new(f);
    caps.write_to(&mut w)
        .with_context(|| format!("write capsule '{}'", path.display()))?;
    w.flush()
        .with_context(|| format!("flush '{}'", path.display()))?;
    Ok(())
}

fn cmd_pack(args: PackArgs) -> anyhow::Result<()> {
    let mut caps = Capsule::from_file(&args.in_path)
        .with_context(|| format!("load '{}'", args.in_path.display()))?;
    if let Some(tag) = args.type_tag {
        caps.set_type_tag(tag);
    }
    write_capsule(&caps, &args.out)?;
    eprintln!(
        "wrote {} (type {}, {} bytes)",
        args.out.display(),
        caps.type_tag(),
        caps.size()
    );
    Ok(())
}

fn cmd_unpack(args: UnpackArgs) -> anyhow::Result<()> {
    let caps = read_capsule(&args.in_path)?;
    let data = caps.data().unwrap_or_default();
    std::fs::write(&args.out, data)
        .with_context(|| format!("write payload '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_capsule(&args.in_path)?.info();
    if args.json {
        let s = serde_json::to_string_pretty(&info).context("serialize capsule info")?;
        println!("{s}");
    } else {
        let kind = info
            .kind
            .map_or_else(|| "unknown".to_owned(), |k| format!("{k:?}").to_lowercase());
        println!("type: {} ({kind})", info.type_tag);
        println!("size: {}", info.size);
    }
    Ok(())
}

fn cmd_png(args: PngArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let surface = decode_image(&bytes)?;

    let mut bridge = Bridge::new(CpuRenderer::default(), BridgeOpts::from_env());
    let texture = Texture::from_surface(&surface, TextureAccess::Static)?;
    let caps = bridge.texture_to_capsule(&texture)?;

    let mut out = FileStream::create(&args.out)
        .with_context(|| format!("create '{}'", args.out.display()))?;
    caps.write_to_stream(&mut out)
        .with_context(|| format!("write capsule '{}'", args.out.display()))?;
    eprintln!("wrote {} ({} bytes)", args.out.display(), caps.size());
    Ok(())
}
