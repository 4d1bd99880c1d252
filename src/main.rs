// main.rs - Desktop entry point. All of the wiring lives in `steamshelf_lib::run`.
#![windows_subsystem = "windows"]

fn main() {
    steamshelf_lib::run()
}
