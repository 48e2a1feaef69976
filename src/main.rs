fn main() {
    std::process::exit(investor_state_lib::run());
}
