use {
    crate::{
        ifs::wl_seat::{Capability, SeatCapabilities},
        it::{test_error::TestResult, testrun::TestRun},
        wire::Modifiers,
    },
    std::rc::Rc,
};

testcase!();

/// Test that a destroyed surface loses all focus without leave events
fn test(run: Rc<TestRun>) -> TestResult {
    run.seat.set_capabilities(
        SeatCapabilities::POINTER | SeatCapabilities::KEYBOARD | SeatCapabilities::TOUCH,
    );
    let client = run.create_client();
    let seat = run.bind(&client)?;
    seat.get_pointer(client.new_id())?;
    seat.get_keyboard(client.new_id())?;
    seat.get_touch(client.new_id())?;
    let surface = run.surface(&client);
    let other = run.surface(&client);
    run.seat.pointer_notify_enter(surface, 0.0, 0.0);
    run.seat.keyboard_notify_enter(surface, &[], Modifiers::default());
    run.seat.touch_notify_down(surface, 1, 0, 0.0, 0.0);
    run.seat.touch_notify_down(other, 1, 1, 0.0, 0.0);
    client.take_events();

    run.seat.surface_destroyed(surface);
    tassert!(client.events().is_empty());
    tassert_eq!(run.seat.pointer_focus().target(), None);
    tassert_eq!(run.seat.keyboard_focus().target(), None);
    tassert_eq!(run.seat.focused_client(Capability::Pointer), None);
    let Some(point) = run.seat.touch_point(0) else {
        bail!("Touch point 0 is missing");
    };
    tassert_eq!(point.binding(), None);
    let Some(point) = run.seat.touch_point(1) else {
        bail!("Touch point 1 is missing");
    };
    tassert_eq!(point.binding(), Some(seat.id));

    run.seat.pointer_notify_enter(surface, 0.0, 0.0);
    tassert_eq!(run.seat.focused_client(Capability::Pointer), Some(seat.id));
    Ok(())
}
