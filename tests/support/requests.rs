#![allow(dead_code)]

use ridepool_core::request::{TimeWindow, TransportationRequest};
use ridepool_core::space::euclidean::Point2;
use ridepool_core::space::graph::VertexId;

pub fn open_euclidean_request(
    request_id: i64,
    created_at: f64,
    origin: Point2,
    destination: Point2,
) -> TransportationRequest<Point2> {
    TransportationRequest {
        request_id,
        creation_timestamp: created_at,
        origin,
        destination,
        pickup_window: TimeWindow::unbounded(),
        delivery_window: TimeWindow::unbounded(),
    }
}

pub fn windowed_euclidean_request(
    request_id: i64,
    created_at: f64,
    origin: Point2,
    destination: Point2,
    pickup_window: TimeWindow,
    delivery_window: TimeWindow,
) -> TransportationRequest<Point2> {
    TransportationRequest {
        request_id,
        creation_timestamp: created_at,
        origin,
        destination,
        pickup_window,
        delivery_window,
    }
}

pub fn open_graph_request(
    request_id: i64,
    created_at: f64,
    origin: VertexId,
    destination: VertexId,
) -> TransportationRequest<VertexId> {
    TransportationRequest {
        request_id,
        creation_timestamp: created_at,
        origin,
        destination,
        pickup_window: TimeWindow::unbounded(),
        delivery_window: TimeWindow::unbounded(),
    }
}
