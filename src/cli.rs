use nasa_explorer::Cli;

fn main() -> anyhow::Result<()> {
    Cli::run()
}
