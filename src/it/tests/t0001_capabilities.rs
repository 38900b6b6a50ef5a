use {
    crate::{
        ifs::wl_seat::SeatCapabilities,
        it::{test_client::Ev, test_error::TestResult, testrun::TestRun},
    },
    std::rc::Rc,
};

testcase!();

/// Test that a capability change reaches every binding exactly once
fn test(run: Rc<TestRun>) -> TestResult {
    let a = run.create_client();
    let b = run.create_client();
    let seat_a = run.bind(&a)?;
    let seat_b = run.bind(&b)?;
    a.take_events();
    b.take_events();
    let caps = SeatCapabilities::POINTER | SeatCapabilities::KEYBOARD;
    run.seat.set_capabilities(caps);
    tassert_eq!(run.seat.capabilities(), caps);
    tassert_eq!(a.take_events(), vec![Ev::Capabilities(seat_a.object_id, caps)]);
    tassert_eq!(b.take_events(), vec![Ev::Capabilities(seat_b.object_id, caps)]);
    run.seat.set_capabilities(caps);
    tassert_eq!(a.take_events(), vec![Ev::Capabilities(seat_a.object_id, caps)]);
    tassert_eq!(b.take_events(), vec![Ev::Capabilities(seat_b.object_id, caps)]);
    run.seat.set_capabilities(SeatCapabilities::none());
    tassert_eq!(
        b.take_events(),
        vec![Ev::Capabilities(seat_b.object_id, SeatCapabilities::none())]
    );
    Ok(())
}
