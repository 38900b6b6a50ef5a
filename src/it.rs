use {
    crate::it::{testrun::TestRun, tests::TestCase},
    isnt::std_1::vec::IsntVecExt,
    log::Level,
};

#[macro_use]
mod test_error;
#[macro_use]
mod test_macros;
mod test_client;
mod test_logger;
mod testrun;

fn run_tests_(tests: Vec<&'static dyn TestCase>) {
    test_logger::install();
    test_logger::set_level(Level::Trace);
    let mut failed = vec![];
    for test in tests {
        log::info!("Running {}", test.name());
        let testrun = TestRun::new();
        if let Err(e) = test.run(testrun) {
            failed.push((test.name(), e.to_string()));
        }
    }
    if failed.is_not_empty() {
        log::error!("The following tests failed:");
        for (name, error) in &failed {
            log::error!("    {}: {}", name, error);
        }
        panic!("Some tests failed");
    }
}
