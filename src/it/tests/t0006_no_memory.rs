use {
    crate::{
        client::Client,
        ifs::wl_seat::{SEAT_VERSION, SeatCapabilities, WlSeatError},
        it::{test_error::TestResult, testrun::TestRun},
        utils::errorfmt::ErrorFmt,
    },
    std::rc::Rc,
};

testcase!();

/// Test that running out of memory leaves no partial state behind
fn test(run: Rc<TestRun>) -> TestResult {
    run.seat.set_capabilities(SeatCapabilities::POINTER);
    let client = run.create_client();
    let dyn_client: Rc<dyn Client> = client.clone();
    client.fail_next_add_object();
    match run.seat.bind(&dyn_client, client.new_id(), SEAT_VERSION) {
        Err(WlSeatError::NoMemory) => {}
        Err(e) => bail!("Unexpected error: {}", ErrorFmt(e)),
        Ok(_) => bail!("Bind succeeded"),
    }
    tassert_eq!(client.no_memory(), 1);
    tassert_eq!(run.seat.num_bindings(), 0);
    tassert_eq!(client.num_objects(), 0);
    tassert!(client.events().is_empty());

    let seat = run.bind(&client)?;
    tassert_eq!(run.seat.num_bindings(), 1);
    client.fail_next_add_object();
    let pointer_id = client.new_id();
    match seat.get_pointer(pointer_id) {
        Err(WlSeatError::NoMemory) => {}
        Err(e) => bail!("Unexpected error: {}", ErrorFmt(e)),
        Ok(_) => bail!("get_pointer succeeded"),
    }
    tassert_eq!(client.no_memory(), 2);
    tassert!(seat.pointers().is_empty());
    tassert!(!client.has_object(pointer_id));
    tassert!(seat.get_pointer(client.new_id())?.is_some());
    Ok(())
}
