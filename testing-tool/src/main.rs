use colored::*;
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "🚚 Courier Route Planner Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    // Paso 1: Pedir URL del servidor y origen a simular
    let target = get_target()?;
    let client = reqwest::Client::new();

    // Paso 2: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🏥 Health check");
        println!("2. 🎯 Optimizar ruta");
        println!("3. 🗺️ Geocodificar dirección");
        println!("4. 📦 Marcar parada entregada");
        println!("5. 📜 Ver paradas entregadas");
        println!("6. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-6): ")?;

        let result = match choice.as_str() {
            "1" => send(&client, &target, reqwest::Method::GET, "/", None).await,
            "2" => match read_stops()? {
                Some(stops) => send(&client, &target, reqwest::Method::POST, "/optimize", Some(json!({ "stops": stops }))).await,
                None => continue,
            },
            "3" => {
                let address = prompt("Dirección: ")?;
                send(&client, &target, reqwest::Method::POST, "/geocode", Some(json!({ "address": address }))).await
            }
            "4" => {
                let stop_id = prompt("Stop ID: ")?;
                send(&client, &target, reqwest::Method::POST, "/mark-delivered", Some(json!({ "stopId": stop_id }))).await
            }
            "5" => send(&client, &target, reqwest::Method::GET, "/delivered", None).await,
            "6" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = result {
            println!("{}", format!("❌ Error en la request: {}", e).bright_red());
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn get_target() -> Result<Target, Box<dyn std::error::Error>> {
    println!("{}", "🌐 SERVIDOR".bright_cyan().bold());
    println!("{}", "===========".bright_cyan());

    let mut base_url = prompt("URL base (Enter = http://localhost:3000): ")?;
    if base_url.is_empty() {
        base_url = "http://localhost:3000".to_string();
    }

    let origin = prompt("Origin a simular (Enter = ninguno): ")?;

    Ok(Target {
        base_url: base_url.trim_end_matches('/').to_string(),
        origin: if origin.is_empty() { None } else { Some(origin) },
    })
}

/// Leer paradas en formato `lat,lon; lat,lon; ...`
fn read_stops() -> Result<Option<Vec<Value>>, Box<dyn std::error::Error>> {
    let raw = prompt("Paradas (lat,lon; lat,lon; ...): ")?;
    let mut stops = Vec::new();

    for pair in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let coords: Vec<&str> = pair.split(',').map(str::trim).collect();
        match (coords.first().map(|c| c.parse::<f64>()), coords.get(1).map(|c| c.parse::<f64>())) {
            (Some(Ok(lat)), Some(Ok(lon))) if coords.len() == 2 => stops.push(json!({ "lat": lat, "lon": lon })),
            _ => {
                println!("{}", format!("❌ Parada inválida: '{}'", pair).bright_red());
                return Ok(None);
            }
        }
    }

    Ok(Some(stops))
}

async fn send(
    client: &reqwest::Client,
    target: &Target,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("{}{}", target.base_url, path);

    println!();
    println!("{}", format!("📤 {} {}", method, url).bright_blue());
    if let Some(body) = &body {
        println!("{}", "📦 Payload:".bright_blue());
        println!("{}", serde_json::to_string_pretty(body)?);
    }

    let mut request = client.request(method, &url);
    if let Some(origin) = &target.origin {
        request = request.header("Origin", origin);
    }
    if let Some(body) = &body {
        request = request.json(body);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    println!();
    let status_line = format!("📥 Status: {}", status);
    if status.is_success() {
        println!("{}", status_line.bright_green().bold());
    } else {
        println!("{}", status_line.bright_red().bold());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json_response) => {
            // Para Directions mostramos solo el orden optimizado
            if let Some(order) = json_response.pointer("/routes/0/waypoint_order") {
                println!("{}", format!("🏁 Orden optimizado de waypoints: {}", order).bright_green().bold());
            } else {
                println!("{}", serde_json::to_string_pretty(&json_response)?);
            }
        }
        Err(_) => println!("{}", text),
    }

    Ok(())
}

#[derive(Debug)]
struct Target {
    base_url: String,
    origin: Option<String>,
}
