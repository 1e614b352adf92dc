use scope_core::Trigger;

pub fn print_info(message: &str) {
    println!("[Scope][INFO] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[Scope][ERROR]: {message}");
}

pub fn print_trigger(trigger: &Trigger) {
    let params = trigger.params();
    println!(
        "{}: level={} hz={} time_ms={} vol={} triggered={} ts={}",
        trigger.id(),
        trigger.level(),
        params.frequency_hz(),
        params.duration_ms(),
        params.volume_percent(),
        trigger.trigger_bool(),
        trigger.level_timestamp()
    );
}

pub fn print_trigger_list(triggers: &[Trigger]) {
    if triggers.is_empty() {
        print_info("No triggers");
    } else {
        print_info("Triggers:");
        for trigger in triggers {
            print_trigger(trigger);
        }
    }
}
