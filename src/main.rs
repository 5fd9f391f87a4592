fn main() -> anyhow::Result<()> {
    copy2::cli::run()
}
