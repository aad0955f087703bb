/// Offering categories checked when no `--category` is given.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "urn:big-iot:ChargingStationCategory",
    "urn:big-iot:BikeSharingStationCategory",
    "urn:big-iot:ParkingSpaceCategory",
    "urn:big-iot:TrafficDataCategory",
    "urn:big-iot:NoisePollutionIndicatorCategory",
    "urn:big-iot:WeatherIndicatorCategory",
    "urn:big-iot:COCategory",
    "urn:proposed:Traffic_Speed",
    "urn:big-iot:ParkingSiteCategory",
    "urn:big-iot:ParkingCategory",
    "urn:big-iot:MobilityFeatureCategory",
    "urn:big-iot:AccidentCategory",
    "urn:big-iot:PM10Category",
    "urn:big-iot:NO2Category",
    "urn:big-iot:AirPollutionIndicatorCategory",
    "urn:big-iot:PM25Category",
    "urn:proposed:proposed:wifiprobes",
    "urn:big-iot:PeopleDensityOnBusCategory",
    "urn:big-iot:LocationTrackingCategory",
    "urn:big-iot:PeopleDensityInAreaCategory",
];
