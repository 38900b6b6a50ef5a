use {
    crate::{
        client::{Client, ClientId},
        display::Display,
        ifs::wl_seat::{FocusTarget, SEAT_VERSION, WlSeat, WlSeatGlobal},
        it::{
            test_client::TestClient,
            test_error::{TestErrorExt, TestResult},
        },
        object::Version,
        utils::numcell::NumCell,
    },
    std::rc::Rc,
};

pub struct TestRun {
    pub display: Rc<Display>,
    pub seat: Rc<WlSeatGlobal>,
    next_client_id: NumCell<u64>,
}

impl TestRun {
    pub fn new() -> Rc<Self> {
        let display = Display::new();
        let seat = WlSeatGlobal::new(&display, "seat0");
        Rc::new(Self {
            display,
            seat,
            next_client_id: NumCell::new(1),
        })
    }

    pub fn create_client(&self) -> Rc<TestClient> {
        let id = ClientId::from_raw(self.next_client_id.fetch_add(1));
        Rc::new(TestClient::new(id))
    }

    pub fn bind(&self, client: &Rc<TestClient>) -> TestResult<Rc<WlSeat>> {
        self.bind_version(client, SEAT_VERSION.0)
    }

    pub fn bind_version(&self, client: &Rc<TestClient>, version: u32) -> TestResult<Rc<WlSeat>> {
        self.bind_to(&self.seat, client, version)
    }

    pub fn bind_to(
        &self,
        seat: &Rc<WlSeatGlobal>,
        client: &Rc<TestClient>,
        version: u32,
    ) -> TestResult<Rc<WlSeat>> {
        let dyn_client: Rc<dyn Client> = client.clone();
        let id = client.new_id();
        seat.bind(&dyn_client, id, Version(version))
            .with_context(|| format!("Client {} could not bind the seat", client.id))
    }

    /// Allocates a surface owned by `client`.
    pub fn surface(&self, client: &TestClient) -> FocusTarget {
        FocusTarget {
            client: client.id,
            surface: client.new_id(),
        }
    }
}
