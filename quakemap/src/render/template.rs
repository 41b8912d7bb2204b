//! HTML page template.
//!
//! `{{TITLE}}` and `{{PAYLOAD}}` are replaced by the renderer. The bootstrap
//! script reads the JSON payload and builds the Leaflet map from it.

pub const LEAFLET_VERSION: &str = "1.9.4";

pub const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@{{LEAFLET_VERSION}}/dist/leaflet.css" crossorigin="" />
  <script src="https://unpkg.com/leaflet@{{LEAFLET_VERSION}}/dist/leaflet.js" crossorigin=""></script>
  <style>
    html, body { height: 100%; margin: 0; padding: 0; }
    #{{CONTAINER}} { position: absolute; inset: 0; }
    .legend { background: rgba(255, 255, 255, 0.9); padding: 6px 10px; border-radius: 4px; line-height: 20px; color: #333; }
    .legend h4 { margin: 0 0 4px; }
    .legend i { width: 18px; height: 18px; float: left; margin-right: 8px; opacity: 0.9; }
  </style>
</head>

<body>
  <div id="{{CONTAINER}}"></div>
  <script id="map-data" type="application/json">{{PAYLOAD}}</script>
  <script>
    (function () {
      var doc = JSON.parse(document.getElementById("map-data").textContent);

      var baseMaps = {};
      var initialLayers = [];
      doc.baseLayers.forEach(function (b) {
        var layer = L.tileLayer(b.urlTemplate, {
          attribution: b.attribution,
          minZoom: b.minZoom,
          maxZoom: b.maxZoom,
          id: b.id,
          accessToken: b.accessToken
        });
        baseMaps[b.name] = layer;
        if (b.name === doc.activeBase) {
          initialLayers.push(layer);
        }
      });

      var overlayMaps = {};
      doc.overlays.forEach(function (o) {
        var group = L.geoJSON(o.features, {
          pointToLayer: function (feature, latlng) {
            var p = feature.properties;
            return p.radiusScale === "meters" ? L.circle(latlng, p.style) : L.circleMarker(latlng, p.style);
          },
          style: function (feature) {
            return feature.properties.style;
          },
          onEachFeature: function (feature, layer) {
            if (feature.properties.popup) {
              layer.bindPopup(feature.properties.popup);
            }
          }
        });
        overlayMaps[o.name] = group;
        if (o.visible) {
          initialLayers.push(group);
        }
      });

      var map = L.map(doc.container, {
        center: doc.center,
        zoom: doc.zoom,
        layers: initialLayers
      });

      if (doc.control) {
        L.control.layers(baseMaps, overlayMaps, { collapsed: doc.control.collapsed }).addTo(map);
      }

      var legend = L.control({ position: doc.legend.position });
      legend.onAdd = function () {
        var div = L.DomUtil.create("div", "legend");
        var title = document.createElement("h4");
        title.textContent = doc.legend.title;
        div.appendChild(title);
        doc.legend.rows.forEach(function (row) {
          var swatch = document.createElement("i");
          swatch.style.background = row.color;
          div.appendChild(swatch);
          div.appendChild(document.createTextNode(row.label));
          div.appendChild(document.createElement("br"));
        });
        return div;
      };
      legend.addTo(map);
    })();
  </script>
</body>

</html>
"#;
