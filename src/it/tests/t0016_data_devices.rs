use {
    crate::{
        ifs::ipc::DynDataDevice,
        it::{test_error::TestResult, testrun::TestRun},
        object::ObjectId,
    },
    std::{cell::Cell, rc::Rc},
};

testcase!();

struct TestDevice {
    id: ObjectId,
    destroyed: Cell<bool>,
}

impl TestDevice {
    fn new(id: ObjectId) -> Rc<Self> {
        Rc::new(Self {
            id,
            destroyed: Cell::new(false),
        })
    }
}

impl DynDataDevice for TestDevice {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn destroy(&self) {
        self.destroyed.set(true);
    }
}

/// Test that data devices are destroyed together with their binding
fn test(run: Rc<TestRun>) -> TestResult {
    let client = run.create_client();
    let seat = run.bind(&client)?;
    let d1 = TestDevice::new(client.new_id());
    let d2 = TestDevice::new(client.new_id());
    let p1 = TestDevice::new(client.new_id());
    seat.add_data_device(d1.clone());
    seat.add_data_device(d2.clone());
    seat.add_primary_selection_device(p1.clone());
    tassert_eq!(seat.data_devices().len(), 2);
    tassert_eq!(seat.primary_selection_devices().len(), 1);
    tassert!(seat.remove_data_device(d2.id).is_some());
    tassert!(seat.remove_data_device(d2.id).is_none());

    seat.release();
    tassert!(d1.destroyed.get());
    tassert!(p1.destroyed.get());
    tassert!(!d2.destroyed.get());
    tassert!(seat.data_devices().is_empty());

    let late = TestDevice::new(client.new_id());
    seat.add_data_device(late.clone());
    tassert!(late.destroyed.get());
    tassert!(seat.data_devices().is_empty());
    Ok(())
}
