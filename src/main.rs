fn main() -> Result<(), Box<dyn std::error::Error>> {
    chartchat::cli::main()
}
