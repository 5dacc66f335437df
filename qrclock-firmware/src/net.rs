//! Network time over the Pico W radio
//!
//! The CYW43 and the IP stack are brought up once at boot in station
//! mode. Each sync joins the configured network if the link is down,
//! waits for DHCP, resolves the server and performs one SNTP exchange.
//! All of it shares a single deadline.

use cyw43::JoinOptions;
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{Config, Stack, StackResources};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_time::{with_deadline, Duration, Instant};
use static_cell::StaticCell;

use qrclock_core::config::{NtpConfig, WifiConfig};
use qrclock_core::time::{sntp, DateTime, DateTimeError, SntpError};
use qrclock_core::traits::TimeSync;
use qrclock_hal_rp2040::RadioPeripherals;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// Socket buffers hold one SNTP packet with room to spare
const SOCKET_BUFFER_LEN: usize = 128;

/// Time sync failures, by the stage that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeSyncError {
    /// No credentials, join refused, or join took too long
    Join,
    /// No address lease before the deadline
    Dhcp,
    /// Server name did not resolve
    Dns,
    /// Socket bind, send or receive failed
    Socket,
    /// No reply before the deadline
    Timeout,
    /// Reply was not a usable SNTP packet
    Protocol(SntpError),
    /// Server time does not fit the calendar
    Date(DateTimeError),
}

/// SNTP client on the CYW43 network stack
pub struct NtpClient {
    control: cyw43::Control<'static>,
    stack: Stack<'static>,
    wifi: WifiConfig,
    ntp: NtpConfig,
    utc_offset_minutes: i32,
}

impl NtpClient {
    /// Power up the radio and start the network stack
    ///
    /// Spawns the radio and network runner tasks. Does not join a
    /// network; that happens on the first sync.
    pub async fn new(
        spawner: Spawner,
        radio: RadioPeripherals,
        wifi: WifiConfig,
        ntp: NtpConfig,
        utc_offset_minutes: i32,
    ) -> Self {
        info!("Radio initializing");

        let fw = cyw43_firmware::CYW43_43439A0;
        let clm = cyw43_firmware::CYW43_43439A0_CLM;

        let pwr = Output::new(radio.pwr, Level::Low);
        let cs = Output::new(radio.cs, Level::High);
        let mut pio = Pio::new(radio.pio, Irqs);
        let spi = PioSpi::new(
            &mut pio.common,
            pio.sm0,
            DEFAULT_CLOCK_DIVIDER,
            pio.irq0,
            cs,
            radio.dio,
            radio.clk,
            radio.dma,
        );

        static STATE: StaticCell<cyw43::State> = StaticCell::new();
        let state = STATE.init(cyw43::State::new());
        let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
        unwrap!(spawner.spawn(wifi_task(runner)));

        control.init(clm).await;
        control
            .set_power_management(cyw43::PowerManagementMode::PowerSave)
            .await;

        let config = Config::dhcpv4(Default::default());
        let seed = 0x5152_434c_6f63_6b32;

        static RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();
        let (stack, runner) = embassy_net::new(
            net_device,
            config,
            RESOURCES.init(StackResources::new()),
            seed,
        );
        unwrap!(spawner.spawn(net_task(runner)));

        info!("Radio ready");

        Self {
            control,
            stack,
            wifi,
            ntp,
            utc_offset_minutes,
        }
    }

    async fn connect(&mut self, deadline: Instant) -> Result<(), TimeSyncError> {
        if !self.wifi.is_configured() {
            warn!("No Wi-Fi network configured");
            return Err(TimeSyncError::Join);
        }

        if !self.stack.is_link_up() {
            info!("Joining Wi-Fi network {}", self.wifi.ssid.as_str());
            let options = if self.wifi.password.is_empty() {
                JoinOptions::new_open()
            } else {
                JoinOptions::new(self.wifi.password.as_bytes())
            };
            with_deadline(deadline, self.control.join(self.wifi.ssid.as_str(), options))
                .await
                .map_err(|_| TimeSyncError::Join)?
                .map_err(|e| {
                    warn!("Join failed: status {}", e.status);
                    TimeSyncError::Join
                })?;
        }

        with_deadline(deadline, self.stack.wait_config_up())
            .await
            .map_err(|_| TimeSyncError::Dhcp)?;

        if let Some(config) = self.stack.config_v4() {
            debug!("IP address {}", config.address);
        }
        Ok(())
    }

    /// One SNTP exchange; returns Unix seconds
    async fn query(&mut self, deadline: Instant) -> Result<u64, TimeSyncError> {
        let server_name = self.ntp.server.as_str();
        let addresses = with_deadline(deadline, self.stack.dns_query(server_name, DnsQueryType::A))
            .await
            .map_err(|_| TimeSyncError::Dns)?
            .map_err(|e| {
                warn!("DNS lookup for {} failed: {:?}", server_name, e);
                TimeSyncError::Dns
            })?;
        let server = *addresses.first().ok_or(TimeSyncError::Dns)?;
        debug!("NTP server {} is {}", server_name, server);

        let mut rx_meta = [PacketMetadata::EMPTY; 1];
        let mut rx_buffer = [0u8; SOCKET_BUFFER_LEN];
        let mut tx_meta = [PacketMetadata::EMPTY; 1];
        let mut tx_buffer = [0u8; SOCKET_BUFFER_LEN];
        let mut socket = UdpSocket::new(
            self.stack,
            &mut rx_meta,
            &mut rx_buffer,
            &mut tx_meta,
            &mut tx_buffer,
        );

        socket.bind(0).map_err(|e| {
            warn!("Socket bind failed: {:?}", e);
            TimeSyncError::Socket
        })?;

        socket
            .send_to(&sntp::request(), (server, self.ntp.port))
            .await
            .map_err(|e| {
                warn!("NTP send failed: {:?}", e);
                TimeSyncError::Socket
            })?;

        let mut response = [0u8; SOCKET_BUFFER_LEN];
        loop {
            let (len, meta) = with_deadline(deadline, socket.recv_from(&mut response))
                .await
                .map_err(|_| TimeSyncError::Timeout)?
                .map_err(|e| {
                    warn!("NTP receive failed: {:?}", e);
                    TimeSyncError::Socket
                })?;

            if meta.endpoint.addr != server || meta.endpoint.port != self.ntp.port {
                debug!("Ignoring datagram from {}", meta.endpoint);
                continue;
            }

            return sntp::parse_response(&response[..len]).map_err(TimeSyncError::Protocol);
        }
    }
}

impl TimeSync for NtpClient {
    type Error = TimeSyncError;

    async fn fetch_datetime(&mut self, timeout_ms: u32) -> Result<DateTime, TimeSyncError> {
        let deadline = Instant::now() + Duration::from_millis(u64::from(timeout_ms));

        self.connect(deadline).await?;
        let unix_seconds = self.query(deadline).await?;
        info!("NTP time: {} (unix timestamp)", unix_seconds);

        // NTP era arithmetic keeps this far below i64::MAX
        DateTime::from_unix(unix_seconds as i64, self.utc_offset_minutes).map_err(TimeSyncError::Date)
    }
}

#[embassy_executor::task]
async fn wifi_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}
