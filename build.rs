fn main() {
    // Propagate the ESP-IDF build environment (linker args, sysroot) to
    // dependent build steps. Host test builds have no ESP-IDF environment
    // and skip this entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
