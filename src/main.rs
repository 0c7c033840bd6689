fn main() {
    cookiebridge::cli::run();
}
