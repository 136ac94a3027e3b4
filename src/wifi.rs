use anyhow::{anyhow, Context, Result};
use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::{EspNvsPartition, NvsDefault};
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{info, warn};

#[derive(Debug)]
pub struct WifiNetwork<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
    pub auth_method: AuthMethod,
}

impl<'a> WifiNetwork<'a> {
    pub const fn new(ssid: &'a str, password: &'a str) -> Self {
        Self {
            ssid,
            password,
            auth_method: AuthMethod::WPA2Personal,
        }
    }

    #[allow(dead_code)]
    pub const fn with_auth(mut self, auth_method: AuthMethod) -> Self {
        self.auth_method = auth_method;
        self
    }
}

/// A live station connection.
///
/// Holds the driver, so the link stays up exactly as long as the value
/// lives; dropping it after the fetch tears the radio down before the
/// long sleep.
pub struct WifiConnection<'a> {
    wifi: Box<BlockingWifi<EspWifi<'static>>>,
    pub network: &'a WifiNetwork<'a>,
}

impl<'a> WifiConnection<'a> {
    pub fn ip_info(&self) -> Result<esp_idf_svc::ipv4::IpInfo> {
        Ok(self.wifi.wifi().sta_netif().get_ip_info()?)
    }
}

/// Scan once and connect to the first known network that is in the air.
pub fn connect_any<'a>(
    modem: Modem,
    networks: &'a [WifiNetwork<'a>],
) -> Result<WifiConnection<'a>> {
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspNvsPartition::<NvsDefault>::take()?;

    let mut wifi = Box::new(BlockingWifi::wrap(
        EspWifi::new(modem, sys_loop.clone(), Some(nvs))?,
        sys_loop,
    )?);

    // Start in station mode and scan for what is around
    wifi.set_configuration(&Configuration::Client(ClientConfiguration::default()))?;
    wifi.start()?;
    let ap_infos = wifi.scan()?;
    let available: Vec<String> = ap_infos
        .iter()
        .map(|ap| ap.ssid.as_str().to_string())
        .collect();
    info!("Found {} available networks", available.len());

    for network in networks {
        if !available.iter().any(|ssid| ssid == network.ssid) {
            continue;
        }
        info!("Attempting to connect to network: {}", network.ssid);

        if let Err(e) = connect_to_network(&mut wifi, network) {
            warn!("Failed to connect to {}: {}", network.ssid, e);
            continue;
        }

        info!("Successfully connected to {}", network.ssid);
        let connection = WifiConnection { wifi, network };
        if let Ok(ip_info) = connection.ip_info() {
            info!("IP: {}", ip_info.ip);
        }
        return Ok(connection);
    }

    Err(anyhow!("No known networks available"))
}

fn connect_to_network(
    wifi: &mut BlockingWifi<EspWifi<'static>>,
    network: &WifiNetwork,
) -> Result<()> {
    let wifi_config = Configuration::Client(ClientConfiguration {
        ssid: network
            .ssid
            .try_into()
            .map_err(|_| anyhow!("SSID too long"))?,
        password: network
            .password
            .try_into()
            .map_err(|_| anyhow!("password too long"))?,
        auth_method: network.auth_method,
        ..Default::default()
    });

    wifi.set_configuration(&wifi_config)?;
    wifi.start()?;
    wifi.connect().context("association failed")?;
    wifi.wait_netif_up().context("no IP lease")?;

    Ok(())
}
